use crate::color::Rgb;

/// Exclusive upper bound of the hue circle, in degrees.
pub const HUE_MAX: u16 = 360;
/// Inclusive upper bound of saturation.
pub const SAT_MAX: u8 = 100;
/// Inclusive upper bound of brightness.
pub const BRT_MAX: u8 = 100;

/// Hue/saturation/brightness color
///
/// Hue is in degrees `[0, 360)`, saturation and brightness are percentages
/// `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hsb {
    pub h: u16,
    pub s: u8,
    pub b: u8,
}

impl Hsb {
    pub const fn new(h: u16, s: u8, b: u8) -> Self {
        Self { h, s, b }
    }

    /// Returns `true` if every channel is inside its range.
    pub const fn is_valid(self) -> bool {
        self.h < HUE_MAX && self.s <= SAT_MAX && self.b <= BRT_MAX
    }

    /// Wrap hue and clamp saturation/brightness into range.
    #[must_use]
    pub const fn normalized(self) -> Self {
        Self {
            h: self.h % HUE_MAX,
            s: if self.s > SAT_MAX { SAT_MAX } else { self.s },
            b: if self.b > BRT_MAX { BRT_MAX } else { self.b },
        }
    }

    /// Same color with the hue rotated by `degrees`.
    #[must_use]
    pub const fn with_hue_shift(self, degrees: u16) -> Self {
        Self {
            h: ((self.h % HUE_MAX) + degrees % HUE_MAX) % HUE_MAX,
            ..self
        }
    }

    /// Same color with another brightness (clamped).
    #[must_use]
    pub const fn with_brightness(self, b: u8) -> Self {
        Self {
            b: if b > BRT_MAX { BRT_MAX } else { b },
            ..self
        }
    }

    /// Convert to RGB.
    pub fn to_rgb(self) -> Rgb {
        hsb_to_rgb(self)
    }
}

/// Convert an HSB color to 8-bit RGB
///
/// Six 60-degree sectors, each picking a permutation of `(v, p, q, t)`.
/// Out-of-range input is normalized first.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]
pub fn hsb_to_rgb(hsb: Hsb) -> Rgb {
    let hsb = hsb.normalized();

    let sector = hsb.h / 60;
    // Fraction through the sector, computed from the integer remainder so the
    // sector boundaries land on exactly zero.
    let f = f32::from(hsb.h % 60) / 60.0;
    let v = f32::from(hsb.b) / f32::from(BRT_MAX);
    let s = f32::from(hsb.s) / f32::from(SAT_MAX);
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb {
        r: (r * 255.0) as u8,
        g: (g * 255.0) as u8,
        b: (b * 255.0) as u8,
    }
}
