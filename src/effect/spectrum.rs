use super::{Effect, RenderContext};
use crate::color::{HUE_MAX, Hsb, Rgb};

/// All LEDs share one hue that walks around the color wheel.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpectrumEffect;

impl Effect for SpectrumEffect {
    fn render(&mut self, ctx: &mut RenderContext<'_, '_>, leds: &mut [Rgb]) {
        let hsb = Hsb {
            h: ctx.state.step % HUE_MAX,
            ..ctx.state.color
        };
        leds.fill(ctx.config.brightness.scale_min_max(hsb).to_rgb());

        ctx.state.step = (ctx.state.step % HUE_MAX + u16::from(ctx.state.speed.get())) % HUE_MAX;
    }
}
