use core::fmt::Debug;

use smart_leds::SmartLedsWrite;

use crate::PixelSink;
use crate::color::Rgb;

/// Adapts any `smart-leds` strip driver into a [`PixelSink`].
#[derive(Debug)]
pub struct StripSink<W>(pub W);

impl<W> StripSink<W> {
    pub const fn new(driver: W) -> Self {
        Self(driver)
    }

    pub fn into_inner(self) -> W {
        self.0
    }
}

impl<W> PixelSink for StripSink<W>
where
    W: SmartLedsWrite<Color = Rgb>,
    W::Error: Debug,
{
    type Error = W::Error;

    fn deliver(&mut self, pixels: &[Rgb]) -> Result<(), Self::Error> {
        self.0.write(pixels.iter().copied())
    }
}
