//! Wave effect
//!
//! Every LED breathes on the same cycle, but each layout wave group adds its
//! own offset, so groups reach full brightness at different times.

use super::breathe::{advance_breathing, breathing_level};
use super::{Effect, RenderContext};
use crate::color::{BRT_MAX, Rgb};

#[derive(Debug, Clone, Copy, Default)]
pub struct WaveEffect;

impl Effect for WaveEffect {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(&mut self, ctx: &mut RenderContext<'_, '_>, leds: &mut [Rgb]) {
        let level = breathing_level(ctx.state.step);
        for (i, led) in leds.iter_mut().enumerate() {
            let offset = i32::from(ctx.layout.wave_offset(i));
            let brightness = (offset - level).clamp(0, i32::from(BRT_MAX)) as u8;
            let hsb = ctx.state.color.with_brightness(brightness);
            *led = ctx.config.brightness.scale_zero_max(hsb).to_rgb();
        }

        advance_breathing(ctx.state);
    }
}
