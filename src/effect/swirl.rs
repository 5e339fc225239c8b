//! Swirl effects
//!
//! - `SwirlEffect`: full rainbow travelling along the strip.
//! - `SwirlBidirectionalEffect`: a narrow hue band sweeping back and forth.

use super::{Effect, RenderContext};
use crate::color::{HUE_MAX, Hsb, Rgb};
use crate::config::defaults::{SWIRL_BAND_HIGH, SWIRL_BAND_LOW};
use crate::state::AnimationState;

const SWIRL_BAND_WIDTH: u16 = SWIRL_BAND_HIGH - SWIRL_BAND_LOW;
const SWIRL_BAND_MIDPOINT: u16 = SWIRL_BAND_LOW + SWIRL_BAND_WIDTH / 2;

/// Rainbow travelling along the strip
#[derive(Debug, Clone, Copy, Default)]
pub struct SwirlEffect;

impl Effect for SwirlEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, ctx: &mut RenderContext<'_, '_>, leds: &mut [Rgb]) {
        if leds.is_empty() {
            return;
        }

        let spacing = HUE_MAX / leds.len().min(usize::from(HUE_MAX)) as u16;
        let step = ctx.state.step % HUE_MAX;
        for (i, led) in leds.iter_mut().enumerate() {
            let offset = (u32::from(spacing) * i as u32 % u32::from(HUE_MAX)) as u16;
            let hsb = Hsb {
                h: (offset + step) % HUE_MAX,
                ..ctx.state.color
            };
            *led = ctx.config.brightness.scale_min_max(hsb).to_rgb();
        }

        ctx.state.step = (step + 2 * u16::from(ctx.state.speed.get())) % HUE_MAX;
    }
}

/// Hue band sweeping back and forth
///
/// The step walks between the band edges and turns around at each one. Pixel
/// hues ramp across the strip from the step and fold back at the high edge.
#[derive(Debug, Clone, Copy)]
pub struct SwirlBidirectionalEffect {
    direction: i8,
}

impl Default for SwirlBidirectionalEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl SwirlBidirectionalEffect {
    pub const fn new() -> Self {
        Self { direction: 1 }
    }

    /// Current sweep direction, `1` or `-1`.
    pub const fn direction(&self) -> i8 {
        self.direction
    }
}

impl Effect for SwirlBidirectionalEffect {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(&mut self, ctx: &mut RenderContext<'_, '_>, leds: &mut [Rgb]) {
        // Step may come from another effect or a restart at 0
        let step = ctx.state.step.clamp(SWIRL_BAND_LOW, SWIRL_BAND_HIGH);

        if !leds.is_empty() {
            let len = leds.len() as u32;
            let offset = u32::from(step - SWIRL_BAND_LOW);
            for (i, led) in leds.iter_mut().enumerate() {
                let ramp = offset + u32::from(SWIRL_BAND_WIDTH) * i as u32 / len;
                let mut hue = u32::from(SWIRL_BAND_LOW) + ramp;
                if hue > u32::from(SWIRL_BAND_HIGH) {
                    hue = (2 * u32::from(SWIRL_BAND_HIGH)).saturating_sub(hue);
                }
                let hue = hue.max(u32::from(SWIRL_BAND_LOW)) as u16;
                let hsb = Hsb {
                    h: hue,
                    ..ctx.state.color
                };
                *led = ctx.config.brightness.scale_min_max(hsb).to_rgb();
            }
        }

        let next = i32::from(step) + i32::from(self.direction) * i32::from(ctx.state.speed.get());
        let next = if next >= i32::from(SWIRL_BAND_HIGH) {
            self.direction = -1;
            SWIRL_BAND_HIGH
        } else if next <= i32::from(SWIRL_BAND_LOW) {
            self.direction = 1;
            SWIRL_BAND_LOW
        } else {
            next as u16
        };
        ctx.state.step = next;
    }

    fn reset(&mut self, state: &mut AnimationState) {
        self.direction = 1;
        state.step = SWIRL_BAND_MIDPOINT;
    }
}
