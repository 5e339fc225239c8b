//! Engine configuration
//!
//! [`defaults`] holds the start values used when nothing is persisted.
//! [`UnderglowConfig`] carries the subset that can be tuned at runtime.

use embassy_time::Duration;

use crate::color::{BrightnessRange, Hsb};
use crate::effect::EffectId;
use crate::state::{AnimationState, Speed};

pub mod defaults {
    // ========================================================================
    // Start state
    // ========================================================================

    /// Hue at first boot
    pub const HUE_START: u16 = 0;

    /// Saturation at first boot
    pub const SAT_START: u8 = 100;

    /// Brightness at first boot
    pub const BRT_START: u8 = 100;

    /// Animation speed at first boot
    pub const SPD_START: u8 = 3;

    /// Raw effect id at first boot
    pub const EFF_START: u8 = 0;

    /// Whether the underglow starts on
    pub const ON_START: bool = true;

    // ========================================================================
    // Adjustment steps
    // ========================================================================

    /// Hue change per adjust request, in degrees
    pub const HUE_STEP: u16 = 10;

    /// Saturation change per adjust request, in percent
    pub const SAT_STEP: u8 = 10;

    /// Brightness change per adjust request, in percent
    pub const BRT_STEP: u8 = 10;

    // ========================================================================
    // Output
    // ========================================================================

    /// Lowest brightness steady effects are allowed to reach
    pub const BRT_MIN: u8 = 0;

    /// Highest output brightness
    pub const BRT_MAX: u8 = 100;

    /// Tick period in milliseconds
    pub const TICK_PERIOD_MS: u64 = 50;

    /// Delay between the last state change and the persisted save
    pub const SAVE_DEBOUNCE_MS: u64 = 60_000;

    // ========================================================================
    // Reactive effects
    // ========================================================================

    /// Maximum number of ripples animating at once
    pub const RIPPLE_TREES: usize = 4;

    /// Number of frames a ripple lives for
    pub const RIPPLE_MAX_FRAMES: usize = 6;

    /// Ticks spent on each ripple frame
    pub const RIPPLE_PACING: u8 = 2;

    /// Brightness lost per ripple frame, in percent
    pub const RIPPLE_FADE_PER_FRAME: u8 = 20;

    /// Heatmap amplification of a key's share of presses
    pub const HEATMAP_GAIN: u8 = 5;

    /// Low edge of the bidirectional swirl hue band
    pub const SWIRL_BAND_LOW: u16 = 240;

    /// High edge of the bidirectional swirl hue band
    pub const SWIRL_BAND_HIGH: u16 = 320;
}

const _: () = assert!(
    defaults::BRT_MIN <= defaults::BRT_MAX,
    "underglow maximum brightness is less than minimum brightness"
);

/// Ripple animation tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RippleConfig {
    /// Ticks spent on each frame before moving outward
    pub pacing: u8,
    /// Brightness lost per frame, in percent
    pub fade_per_frame: u8,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            pacing: defaults::RIPPLE_PACING,
            fade_per_frame: defaults::RIPPLE_FADE_PER_FRAME,
        }
    }
}

/// Configuration for the underglow engine
#[derive(Debug, Clone)]
pub struct UnderglowConfig {
    /// Output brightness range
    pub brightness: BrightnessRange,
    /// Hue change per adjust request
    pub hue_step: u16,
    /// Saturation change per adjust request
    pub sat_step: u8,
    /// Brightness change per adjust request
    pub brt_step: u8,
    /// State used when nothing valid is persisted
    pub start: AnimationState,
    /// Period between ticks
    pub tick_period: Duration,
    /// Delay between the last change and the save
    pub save_debounce: Duration,
    /// Ripple tuning
    pub ripple: RippleConfig,
    /// Heatmap amplification constant
    pub heatmap_gain: u8,
}

impl Default for UnderglowConfig {
    fn default() -> Self {
        Self {
            brightness: BrightnessRange::new(defaults::BRT_MIN, defaults::BRT_MAX)
                .unwrap_or(BrightnessRange::FULL),
            hue_step: defaults::HUE_STEP,
            sat_step: defaults::SAT_STEP,
            brt_step: defaults::BRT_STEP,
            start: AnimationState {
                color: Hsb::new(defaults::HUE_START, defaults::SAT_START, defaults::BRT_START),
                speed: Speed::new(defaults::SPD_START),
                effect: EffectId::from_raw(defaults::EFF_START).unwrap_or(EffectId::Solid),
                step: 0,
                on: defaults::ON_START,
            },
            tick_period: Duration::from_millis(defaults::TICK_PERIOD_MS),
            save_debounce: Duration::from_millis(defaults::SAVE_DEBOUNCE_MS),
            ripple: RippleConfig::default(),
            heatmap_gain: defaults::HEATMAP_GAIN,
        }
    }
}
