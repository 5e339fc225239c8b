//! Responsive effect
//!
//! Keyed LEDs switch to the complementary hue while their key is held.

use super::{Effect, RenderContext};
use crate::color::{HUE_MAX, Rgb};
use crate::state::AnimationState;

#[derive(Debug, Clone)]
pub struct ResponsiveEffect<const KEYS: usize> {
    held: [bool; KEYS],
}

impl<const KEYS: usize> Default for ResponsiveEffect<KEYS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const KEYS: usize> ResponsiveEffect<KEYS> {
    pub const fn new() -> Self {
        Self {
            held: [false; KEYS],
        }
    }

    /// Mark `key` as held or released. Out-of-range keys are ignored.
    pub fn set_held(&mut self, key: usize, held: bool) {
        if let Some(slot) = self.held.get_mut(key) {
            *slot = held;
        }
    }

    pub fn is_held(&self, key: usize) -> bool {
        self.held.get(key).copied().unwrap_or(false)
    }
}

impl<const KEYS: usize> Effect for ResponsiveEffect<KEYS> {
    fn render(&mut self, ctx: &mut RenderContext<'_, '_>, leds: &mut [Rgb]) {
        let range = ctx.config.brightness;
        let base = range.scale_min_max(ctx.state.color).to_rgb();
        let pressed = range
            .scale_min_max(ctx.state.color.with_hue_shift(HUE_MAX / 2))
            .to_rgb();

        for (i, led) in leds.iter_mut().enumerate() {
            let held = i >= ctx.layout.backlight_leds()
                && ctx.layout.key_for_led(i).is_some_and(|key| self.is_held(key));
            *led = if held { pressed } else { base };
        }
    }

    fn reset(&mut self, _state: &mut AnimationState) {
        self.held = [false; KEYS];
    }
}
