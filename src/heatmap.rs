//! Per-key usage counters
//!
//! Counts presses per key position plus a running total. The total starts at
//! 1 so shares can always be computed. Counters only grow; re-selecting the
//! heatmap effect starts a fresh accumulator.

use crate::color::HUE_MAX;

/// Press counters for `KEYS` key positions.
#[derive(Debug, Clone)]
pub struct Heatmap<const KEYS: usize> {
    counts: [u32; KEYS],
    total: u32,
}

impl<const KEYS: usize> Default for Heatmap<KEYS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const KEYS: usize> Heatmap<KEYS> {
    pub const fn new() -> Self {
        Self {
            counts: [0; KEYS],
            total: 1,
        }
    }

    /// Zero every counter and set the total back to 1.
    pub fn reset(&mut self) {
        self.counts = [0; KEYS];
        self.total = 1;
    }

    /// Count one press of `key`. Out-of-range keys are ignored.
    pub fn record_press(&mut self, key: usize) {
        let Some(count) = self.counts.get_mut(key) else {
            return;
        };
        *count = count.saturating_add(1);
        self.total = self.total.saturating_add(1);
    }

    /// Presses recorded for `key` (0 if out of range).
    pub fn count(&self, key: usize) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Running total, including the initial 1.
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Hue shift for `key`, in degrees
    ///
    /// `clamp(gain * count / total, 0, 1) * 180`, rounded down. The gain
    /// makes keys with a small share still drift visibly.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn hue_shift(&self, key: usize, gain: u8) -> u16 {
        let share = f32::from(gain) * self.count(key) as f32 / self.total as f32;
        let share = share.clamp(0.0, 1.0);
        libm::floorf(share * f32::from(HUE_MAX / 2)) as u16
    }
}
