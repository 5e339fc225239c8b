//! Effect system with compile-time known effect variants
//!
//! All effects are stored in an enum to avoid heap allocations.
//! Each effect implements the `Effect` trait. Effects that react to keys keep
//! their per-key data inside their slot, so switching effects always starts
//! them fresh.

mod breathe;
mod heatmap;
mod responsive;
mod ripple;
mod solid;
mod spectrum;
mod swirl;
mod wave;

pub use breathe::BreatheEffect;
pub use heatmap::HeatmapEffect;
pub use responsive::ResponsiveEffect;
pub use ripple::RippleEffect;
pub use solid::SolidEffect;
pub use spectrum::SpectrumEffect;
pub use swirl::{SwirlBidirectionalEffect, SwirlEffect};
pub use wave::WaveEffect;

use crate::color::Rgb;
use crate::config::UnderglowConfig;
use crate::heatmap::Heatmap;
use crate::layout::Layout;
use crate::ripple::RippleEngine;
use crate::state::AnimationState;

const EFFECT_NAME_SOLID: &str = "solid";
const EFFECT_NAME_BREATHE: &str = "breathe";
const EFFECT_NAME_SPECTRUM: &str = "spectrum";
const EFFECT_NAME_SWIRL: &str = "swirl";
const EFFECT_NAME_SWIRL_BIDIRECTIONAL: &str = "swirl_bidirectional";
const EFFECT_NAME_WAVE: &str = "wave";
const EFFECT_NAME_RESPONSIVE: &str = "responsive";
const EFFECT_NAME_HEATMAP: &str = "heatmap";
const EFFECT_NAME_RIPPLE: &str = "ripple";

const EFFECT_ID_SOLID: u8 = 0;
const EFFECT_ID_BREATHE: u8 = 1;
const EFFECT_ID_SPECTRUM: u8 = 2;
const EFFECT_ID_SWIRL: u8 = 3;
const EFFECT_ID_SWIRL_BIDIRECTIONAL: u8 = 4;
const EFFECT_ID_WAVE: u8 = 5;
const EFFECT_ID_RESPONSIVE: u8 = 6;
const EFFECT_ID_HEATMAP: u8 = 7;
const EFFECT_ID_RIPPLE: u8 = 8;

/// Everything a renderer may read or advance during one tick.
pub struct RenderContext<'r, 'a> {
    pub state: &'r mut AnimationState,
    pub layout: &'r Layout<'a>,
    pub config: &'r UnderglowConfig,
}

pub trait Effect {
    /// Fill `leds` for this tick and advance the animation
    fn render(&mut self, ctx: &mut RenderContext<'_, '_>, leds: &mut [Rgb]);

    /// Prepare a freshly selected effect
    fn reset(&mut self, _state: &mut AnimationState) {}
}

/// Known effect ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectId {
    Solid = EFFECT_ID_SOLID,
    Breathe = EFFECT_ID_BREATHE,
    Spectrum = EFFECT_ID_SPECTRUM,
    Swirl = EFFECT_ID_SWIRL,
    SwirlBidirectional = EFFECT_ID_SWIRL_BIDIRECTIONAL,
    Wave = EFFECT_ID_WAVE,
    Responsive = EFFECT_ID_RESPONSIVE,
    Heatmap = EFFECT_ID_HEATMAP,
    Ripple = EFFECT_ID_RIPPLE,
}

impl EffectId {
    /// Number of effects.
    pub const COUNT: u8 = 9;

    /// Every effect in id order.
    pub const ALL: [Self; Self::COUNT as usize] = [
        Self::Solid,
        Self::Breathe,
        Self::Spectrum,
        Self::Swirl,
        Self::SwirlBidirectional,
        Self::Wave,
        Self::Responsive,
        Self::Heatmap,
        Self::Ripple,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_SOLID => Self::Solid,
            EFFECT_ID_BREATHE => Self::Breathe,
            EFFECT_ID_SPECTRUM => Self::Spectrum,
            EFFECT_ID_SWIRL => Self::Swirl,
            EFFECT_ID_SWIRL_BIDIRECTIONAL => Self::SwirlBidirectional,
            EFFECT_ID_WAVE => Self::Wave,
            EFFECT_ID_RESPONSIVE => Self::Responsive,
            EFFECT_ID_HEATMAP => Self::Heatmap,
            EFFECT_ID_RIPPLE => Self::Ripple,
            _ => return None,
        })
    }

    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// The effect `direction` places away, wrapping around both ends.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn cycled(self, direction: i8) -> Self {
        let count = i16::from(Self::COUNT);
        let raw = (i16::from(self.raw()) + count + i16::from(direction)).rem_euclid(count);
        Self::ALL[raw as usize]
    }

    pub fn to_slot<const KEYS: usize>(self) -> EffectSlot<KEYS> {
        match self {
            Self::Solid => EffectSlot::Solid(SolidEffect),
            Self::Breathe => EffectSlot::Breathe(BreatheEffect),
            Self::Spectrum => EffectSlot::Spectrum(SpectrumEffect),
            Self::Swirl => EffectSlot::Swirl(SwirlEffect),
            Self::SwirlBidirectional => {
                EffectSlot::SwirlBidirectional(SwirlBidirectionalEffect::new())
            }
            Self::Wave => EffectSlot::Wave(WaveEffect),
            Self::Responsive => EffectSlot::Responsive(ResponsiveEffect::new()),
            Self::Heatmap => EffectSlot::Heatmap(HeatmapEffect::new()),
            Self::Ripple => EffectSlot::Ripple(RippleEffect::new()),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solid => EFFECT_NAME_SOLID,
            Self::Breathe => EFFECT_NAME_BREATHE,
            Self::Spectrum => EFFECT_NAME_SPECTRUM,
            Self::Swirl => EFFECT_NAME_SWIRL,
            Self::SwirlBidirectional => EFFECT_NAME_SWIRL_BIDIRECTIONAL,
            Self::Wave => EFFECT_NAME_WAVE,
            Self::Responsive => EFFECT_NAME_RESPONSIVE,
            Self::Heatmap => EFFECT_NAME_HEATMAP,
            Self::Ripple => EFFECT_NAME_RIPPLE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_SOLID => Some(Self::Solid),
            EFFECT_NAME_BREATHE => Some(Self::Breathe),
            EFFECT_NAME_SPECTRUM => Some(Self::Spectrum),
            EFFECT_NAME_SWIRL => Some(Self::Swirl),
            EFFECT_NAME_SWIRL_BIDIRECTIONAL => Some(Self::SwirlBidirectional),
            EFFECT_NAME_WAVE => Some(Self::Wave),
            EFFECT_NAME_RESPONSIVE => Some(Self::Responsive),
            EFFECT_NAME_HEATMAP => Some(Self::Heatmap),
            EFFECT_NAME_RIPPLE => Some(Self::Ripple),
            _ => None,
        }
    }
}

/// Effect slot - enum containing all possible effects
#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum EffectSlot<const KEYS: usize> {
    /// Every LED the current color
    Solid(SolidEffect),
    /// Whole strip fading in and out
    Breathe(BreatheEffect),
    /// Whole strip cycling through hues
    Spectrum(SpectrumEffect),
    /// Rainbow travelling along the strip
    Swirl(SwirlEffect),
    /// Hue band sweeping back and forth
    SwirlBidirectional(SwirlBidirectionalEffect),
    /// LED groups breathing out of phase
    Wave(WaveEffect),
    /// Held keys lit in the complementary hue
    Responsive(ResponsiveEffect<KEYS>),
    /// Hue drift proportional to key usage
    Heatmap(HeatmapEffect<KEYS>),
    /// Rings spreading out from pressed keys
    Ripple(RippleEffect<KEYS>),
}

impl<const KEYS: usize> Default for EffectSlot<KEYS> {
    fn default() -> Self {
        Self::Solid(SolidEffect)
    }
}

impl<const KEYS: usize> EffectSlot<KEYS> {
    /// Render the current effect
    pub fn render(&mut self, ctx: &mut RenderContext<'_, '_>, leds: &mut [Rgb]) {
        match self {
            Self::Solid(effect) => effect.render(ctx, leds),
            Self::Breathe(effect) => effect.render(ctx, leds),
            Self::Spectrum(effect) => effect.render(ctx, leds),
            Self::Swirl(effect) => effect.render(ctx, leds),
            Self::SwirlBidirectional(effect) => effect.render(ctx, leds),
            Self::Wave(effect) => effect.render(ctx, leds),
            Self::Responsive(effect) => effect.render(ctx, leds),
            Self::Heatmap(effect) => effect.render(ctx, leds),
            Self::Ripple(effect) => effect.render(ctx, leds),
        }
    }

    /// Run the effect's initializer
    pub fn reset(&mut self, state: &mut AnimationState) {
        match self {
            Self::Solid(effect) => Effect::reset(effect, state),
            Self::Breathe(effect) => Effect::reset(effect, state),
            Self::Spectrum(effect) => Effect::reset(effect, state),
            Self::Swirl(effect) => Effect::reset(effect, state),
            Self::SwirlBidirectional(effect) => Effect::reset(effect, state),
            Self::Wave(effect) => Effect::reset(effect, state),
            Self::Responsive(effect) => Effect::reset(effect, state),
            Self::Heatmap(effect) => Effect::reset(effect, state),
            Self::Ripple(effect) => Effect::reset(effect, state),
        }
    }

    /// Get the effect ID for external observation
    pub fn id(&self) -> EffectId {
        match self {
            Self::Solid(_) => EffectId::Solid,
            Self::Breathe(_) => EffectId::Breathe,
            Self::Spectrum(_) => EffectId::Spectrum,
            Self::Swirl(_) => EffectId::Swirl,
            Self::SwirlBidirectional(_) => EffectId::SwirlBidirectional,
            Self::Wave(_) => EffectId::Wave,
            Self::Responsive(_) => EffectId::Responsive,
            Self::Heatmap(_) => EffectId::Heatmap,
            Self::Ripple(_) => EffectId::Ripple,
        }
    }

    /// Drop running ripples, if the ripple effect is active.
    pub fn clear_ripples(&mut self) {
        if let Self::Ripple(effect) = self {
            effect.clear();
        }
    }

    /// Usage counters, while the heatmap is active.
    pub fn heatmap(&self) -> Option<&Heatmap<KEYS>> {
        match self {
            Self::Heatmap(effect) => Some(effect.counters()),
            _ => None,
        }
    }

    /// Ripple pool, while the ripple effect is active.
    pub fn ripples(&self) -> Option<&RippleEngine<KEYS>> {
        match self {
            Self::Ripple(effect) => Some(effect.engine()),
            _ => None,
        }
    }
}
