//! Breathing effect
//!
//! Brightness follows a triangle wave over `BREATHE_CYCLE` step units: full
//! at both ends of the cycle, dark in the middle.

use super::{Effect, RenderContext};
use crate::color::Rgb;
use crate::state::AnimationState;

/// Length of one breathing cycle, in step units.
pub(crate) const BREATHE_CYCLE: u16 = 2400;
const BREATHE_MIDPOINT: i32 = BREATHE_CYCLE as i32 / 2;
const BREATHE_DIVISOR: i32 = 12;
/// Step units added per tick at speed 1.
const BREATHE_STEP: u16 = 10;

/// Distance from the middle of the cycle, scaled to `[0, 100]`.
pub(crate) fn breathing_level(step: u16) -> i32 {
    (i32::from(step) - BREATHE_MIDPOINT).abs() / BREATHE_DIVISOR
}

/// Move along the breathing cycle, wrapping to 0 past its end.
pub(crate) fn advance_breathing(state: &mut AnimationState) {
    state.step = state
        .step
        .saturating_add(u16::from(state.speed.get()) * BREATHE_STEP);
    if state.step > BREATHE_CYCLE {
        state.step = 0;
    }
}

/// Whole strip fading to black and back.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreatheEffect;

impl Effect for BreatheEffect {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(&mut self, ctx: &mut RenderContext<'_, '_>, leds: &mut [Rgb]) {
        let level = breathing_level(ctx.state.step).clamp(0, 100) as u8;
        let color = ctx
            .config
            .brightness
            .scale_zero_max(ctx.state.color.with_brightness(level))
            .to_rgb();
        leds.fill(color);

        advance_breathing(ctx.state);
    }
}
