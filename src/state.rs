//! Animation state record
//!
//! The record is persisted as a fixed-size byte blob. Its layout is the
//! persistence contract: changing a field's size or order invalidates every
//! stored record (there is no migration, the layout is version 0).

use crate::color::{BRT_MAX, HUE_MAX, Hsb, SAT_MAX};
use crate::effect::EffectId;
use crate::error::{Result, UnderglowError};

/// Size of a persisted [`AnimationState`] record in bytes.
pub const STATE_RECORD_LEN: usize = 9;

/// Persisted state bytes.
pub type StateRecord = [u8; STATE_RECORD_LEN];

/// Animation speed, always within `[Speed::MIN, Speed::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Speed(u8);

impl Speed {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Create a speed, clamping into range.
    pub const fn new(value: u8) -> Self {
        if value < Self::MIN {
            Self(Self::MIN)
        } else if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Speed moved by `direction` steps, clamped into range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn adjusted(self, direction: i8) -> Self {
        let value = (i16::from(self.0) + i16::from(direction))
            .clamp(i16::from(Self::MIN), i16::from(Self::MAX));
        Self(value as u8)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

/// Mutable record describing the current animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationState {
    pub color: Hsb,
    pub speed: Speed,
    pub effect: EffectId,
    /// Effect-specific animation counter
    pub step: u16,
    pub on: bool,
}

impl AnimationState {
    /// Serialize into the persisted record layout.
    ///
    /// `[hue lo, hue hi, sat, brt, speed, effect, step lo, step hi, on]`
    #[allow(clippy::cast_lossless)]
    pub const fn to_record(&self) -> StateRecord {
        let hue = self.color.h.to_le_bytes();
        let step = self.step.to_le_bytes();
        [
            hue[0],
            hue[1],
            self.color.s,
            self.color.b,
            self.speed.get(),
            self.effect.raw(),
            step[0],
            step[1],
            self.on as u8,
        ]
    }

    /// Restore from persisted bytes.
    ///
    /// Rejects records of the wrong length and records with any field out of
    /// range.
    pub fn from_record(bytes: &[u8]) -> Result<Self> {
        let record: &StateRecord = bytes
            .try_into()
            .map_err(|_| UnderglowError::InvalidStateRecord)?;

        let color = Hsb::new(u16::from_le_bytes([record[0], record[1]]), record[2], record[3]);
        if !color.is_valid() {
            return Err(UnderglowError::InvalidStateRecord);
        }
        let speed = record[4];
        if !(Speed::MIN..=Speed::MAX).contains(&speed) {
            return Err(UnderglowError::InvalidStateRecord);
        }
        let effect = EffectId::from_raw(record[5]).ok_or(UnderglowError::InvalidStateRecord)?;
        let on = match record[8] {
            0 => false,
            1 => true,
            _ => return Err(UnderglowError::InvalidStateRecord),
        };

        Ok(Self {
            color,
            speed: Speed(speed),
            effect,
            step: u16::from_le_bytes([record[6], record[7]]),
            on,
        })
    }

    /// Color with the hue moved by `direction * step` degrees, wrapping.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn hue_adjusted(&self, direction: i8, step: u16) -> Hsb {
        let h = (i32::from(self.color.h) + i32::from(direction) * i32::from(step))
            .rem_euclid(i32::from(HUE_MAX));
        Hsb {
            h: h as u16,
            ..self.color
        }
    }

    /// Color with saturation moved by `direction * step`, clamped.
    pub fn saturation_adjusted(&self, direction: i8, step: u8) -> Hsb {
        Hsb {
            s: clamp_percent(self.color.s, direction, step, SAT_MAX),
            ..self.color
        }
    }

    /// Color with brightness moved by `direction * step`, clamped.
    pub fn brightness_adjusted(&self, direction: i8, step: u8) -> Hsb {
        Hsb {
            b: clamp_percent(self.color.b, direction, step, BRT_MAX),
            ..self.color
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_percent(value: u8, direction: i8, step: u8, max: u8) -> u8 {
    (i32::from(value) + i32::from(direction) * i32::from(step)).clamp(0, i32::from(max)) as u8
}
