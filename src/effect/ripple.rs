//! Ripple effect
//!
//! Draws the live trees of a [`RippleEngine`] over the base color: each
//! tree's current frame in the complementary hue, dimmer the further out it
//! is, and the held origin key at full brightness.

use super::{Effect, RenderContext};
use crate::color::{BRT_MAX, HUE_MAX, Rgb};
use crate::error::Result;
use crate::layout::Layout;
use crate::ripple::{RippleEngine, RippleHandle};
use crate::state::AnimationState;

#[derive(Debug, Clone)]
pub struct RippleEffect<const KEYS: usize> {
    engine: RippleEngine<KEYS>,
}

impl<const KEYS: usize> Default for RippleEffect<KEYS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const KEYS: usize> RippleEffect<KEYS> {
    pub fn new() -> Self {
        Self {
            engine: RippleEngine::new(),
        }
    }

    /// Start a ripple at `key`.
    pub fn begin(&mut self, layout: &Layout<'_>, key: usize) -> Result<RippleHandle> {
        self.engine.begin(layout, key)
    }

    /// Stop every ripple held by `key`.
    pub fn release(&mut self, key: usize) -> usize {
        self.engine.release(key)
    }

    /// Drop every running ripple.
    pub fn clear(&mut self) {
        self.engine.clear();
    }

    pub const fn engine(&self) -> &RippleEngine<KEYS> {
        &self.engine
    }
}

impl<const KEYS: usize> Effect for RippleEffect<KEYS> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, ctx: &mut RenderContext<'_, '_>, leds: &mut [Rgb]) {
        let range = ctx.config.brightness;
        let base = ctx.state.color;
        let accent = base.with_hue_shift(HUE_MAX / 2);
        let fade_per_frame = u16::from(ctx.config.ripple.fade_per_frame);

        leds.fill(range.scale_min_max(base).to_rgb());

        for view in self.engine.views() {
            let fade = fade_per_frame
                .saturating_mul(view.frame as u16)
                .min(u16::from(BRT_MAX));
            let percent = u16::from(BRT_MAX) - fade;
            let brightness = (u16::from(base.b) * percent / u16::from(BRT_MAX)) as u8;
            let ring = range.scale_min_max(accent.with_brightness(brightness)).to_rgb();

            for &key in view.keys {
                if let Some(led) = ctx.layout.led_for_key(usize::from(key))
                    && let Some(pixel) = leds.get_mut(led)
                {
                    *pixel = ring;
                }
            }

            if let Some(held) = view.held
                && let Some(led) = ctx.layout.led_for_key(held)
                && let Some(pixel) = leds.get_mut(led)
            {
                *pixel = range.scale_min_max(accent).to_rgb();
            }
        }

        self.engine.advance(ctx.config.ripple.pacing);
    }

    fn reset(&mut self, _state: &mut AnimationState) {
        self.engine.clear();
    }
}
