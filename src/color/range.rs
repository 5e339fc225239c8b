//! Brightness remapping
//!
//! Steady effects remap brightness into `[min, max]` so the strip never goes
//! fully dark. Fading effects remap into `[0, max]` so they can reach black.

use crate::color::{BRT_MAX, Hsb};
use crate::error::{Result, UnderglowError};

/// Configured output brightness range, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessRange {
    min: u8,
    max: u8,
}

impl Default for BrightnessRange {
    fn default() -> Self {
        Self::FULL
    }
}

impl BrightnessRange {
    /// The whole `[0, 100]` range.
    pub const FULL: Self = Self { min: 0, max: BRT_MAX };

    /// Create a new range.
    ///
    /// Fails if `min > max` or `max > 100`.
    pub const fn new(min: u8, max: u8) -> Result<Self> {
        if max > BRT_MAX {
            return Err(UnderglowError::InvalidArgument("brightness max above 100"));
        }
        if min > max {
            return Err(UnderglowError::InvalidArgument("brightness min above max"));
        }
        Ok(Self { min, max })
    }

    pub const fn min(self) -> u8 {
        self.min
    }

    pub const fn max(self) -> u8 {
        self.max
    }

    /// Remap brightness from `[0, 100]` into `[min, max]`.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn scale_min_max(self, hsb: Hsb) -> Hsb {
        let b = if hsb.b > BRT_MAX { BRT_MAX } else { hsb.b };
        let span = (self.max - self.min) as u16;
        let scaled = self.min as u16 + span * b as u16 / BRT_MAX as u16;
        Hsb { b: scaled as u8, ..hsb }
    }

    /// Remap brightness from `[0, 100]` into `[0, max]`.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn scale_zero_max(self, hsb: Hsb) -> Hsb {
        let b = if hsb.b > BRT_MAX { BRT_MAX } else { hsb.b };
        let scaled = b as u16 * self.max as u16 / BRT_MAX as u16;
        Hsb { b: scaled as u8, ..hsb }
    }
}
