//! Solid color fill effect

use super::{Effect, RenderContext};
use crate::color::Rgb;

/// Fills every LED with the current color, never below the configured minimum
/// brightness.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidEffect;

impl Effect for SolidEffect {
    fn render(&mut self, ctx: &mut RenderContext<'_, '_>, leds: &mut [Rgb]) {
        let color = ctx.config.brightness.scale_min_max(ctx.state.color).to_rgb();
        leds.fill(color);
    }
}
