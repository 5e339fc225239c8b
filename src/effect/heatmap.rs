//! Heatmap effect
//!
//! Backlight LEDs keep the base color. Every keyed LED drifts away from the
//! base hue in proportion to how often its key is pressed.

use super::{Effect, RenderContext};
use crate::color::Rgb;
use crate::heatmap::Heatmap;
use crate::state::AnimationState;

#[derive(Debug, Clone)]
pub struct HeatmapEffect<const KEYS: usize> {
    counters: Heatmap<KEYS>,
}

impl<const KEYS: usize> Default for HeatmapEffect<KEYS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const KEYS: usize> HeatmapEffect<KEYS> {
    pub const fn new() -> Self {
        Self {
            counters: Heatmap::new(),
        }
    }

    /// Count a key press.
    pub fn record_press(&mut self, key: usize) {
        self.counters.record_press(key);
    }

    pub const fn counters(&self) -> &Heatmap<KEYS> {
        &self.counters
    }
}

impl<const KEYS: usize> Effect for HeatmapEffect<KEYS> {
    fn render(&mut self, ctx: &mut RenderContext<'_, '_>, leds: &mut [Rgb]) {
        let range = ctx.config.brightness;
        let base = ctx.state.color;
        let backlight = ctx.layout.backlight_leds().min(leds.len());
        let (backlight_leds, keyed_leds) = leds.split_at_mut(backlight);

        backlight_leds.fill(range.scale_min_max(base).to_rgb());

        for (i, led) in keyed_leds.iter_mut().enumerate() {
            let shift = ctx
                .layout
                .key_for_led(backlight + i)
                .map_or(0, |key| self.counters.hue_shift(key, ctx.config.heatmap_gain));
            *led = range.scale_min_max(base.with_hue_shift(shift)).to_rgb();
        }
    }

    fn reset(&mut self, _state: &mut AnimationState) {
        self.counters.reset();
    }
}
