mod hsb;
mod range;

use smart_leds::RGB8;

pub use hsb::{BRT_MAX, HUE_MAX, Hsb, SAT_MAX, hsb_to_rgb};
pub use range::BrightnessRange;

pub type Rgb = RGB8;

/// All channels off.
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
