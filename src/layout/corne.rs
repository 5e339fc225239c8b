//! 42-key split Corne with 27-LED "aurora" underglow per half.
//!
//! Key positions run row by row across both halves: rows of 12 keys
//! (`0..36`), then six thumb keys (`36..42`). The first six LEDs of each
//! half are backlight and have no key.

use super::{Layout, WaveGroup};

/// Number of logical key positions.
pub const KEY_COUNT: usize = 42;

/// LEDs on each half.
pub const LED_COUNT: usize = 27;

/// Backlight LEDs at the start of each strip.
pub const BACKLIGHT_LEDS: usize = 6;

#[allow(clippy::cast_sign_loss)]
const fn wiring<const N: usize>(raw: [i8; N]) -> [Option<u8>; N] {
    let mut out = [None; N];
    let mut i = 0;
    while i < N {
        if raw[i] >= 0 {
            out[i] = Some(raw[i] as u8);
        }
        i += 1;
    }
    out
}

#[rustfmt::skip]
static LEFT_KEY_TO_LED: [Option<u8>; KEY_COUNT] = wiring([
    24, 23, 22, 21, 20, 19, -1, -1, -1, -1, -1, -1,
    25, 18, 17, 16, 15, 14, -1, -1, -1, -1, -1, -1,
    26, 13, 12, 11, 10,  9, -1, -1, -1, -1, -1, -1,
     8,  7,  6, -1, -1, -1,
]);

#[rustfmt::skip]
static LEFT_LED_TO_KEY: [Option<u8>; LED_COUNT] = wiring([
    -1, -1, -1, -1, -1, -1, 38, 37, 36, 29, 28, 27, 26, 25,
    17, 16, 15, 14, 13,  5,  4,  3,  2,  1,  0, 12, 24,
]);

#[rustfmt::skip]
static RIGHT_KEY_TO_LED: [Option<u8>; KEY_COUNT] = wiring([
    -1, -1, -1, -1, -1, -1, 19, 20, 21, 22, 23, 24,
    -1, -1, -1, -1, -1, -1, 14, 15, 16, 17, 18, 25,
    -1, -1, -1, -1, -1, -1,  9, 10, 11, 12, 13, 26,
    -1, -1, -1,  6,  7,  8,
]);

#[rustfmt::skip]
static RIGHT_LED_TO_KEY: [Option<u8>; LED_COUNT] = wiring([
    -1, -1, -1, -1, -1, -1, 39, 40, 41, 30, 31, 32, 33, 34,
    18, 19, 20, 21, 22,  6,  7,  8,  9, 10, 11, 23, 35,
]);

// Neighbors listed up, left, right, down. Halves are not connected.
static ADJACENCY: [&[u8]; KEY_COUNT] = [
    &[1, 12],
    &[0, 2, 13],
    &[1, 3, 14],
    &[2, 4, 15],
    &[3, 5, 16],
    &[4, 17],
    &[7, 18],
    &[6, 8, 19],
    &[7, 9, 20],
    &[8, 10, 21],
    &[9, 11, 22],
    &[10, 23],
    &[0, 13, 24],
    &[1, 12, 14, 25],
    &[2, 13, 15, 26],
    &[3, 14, 16, 27],
    &[4, 15, 17, 28],
    &[5, 16, 29],
    &[6, 19, 30],
    &[7, 18, 20, 31],
    &[8, 19, 21, 32],
    &[9, 20, 22, 33],
    &[10, 21, 23, 34],
    &[11, 22, 35],
    &[12, 25],
    &[13, 24, 26],
    &[14, 25, 27],
    &[15, 26, 28, 36],
    &[16, 27, 29, 37],
    &[17, 28, 38],
    &[18, 31, 39],
    &[19, 30, 32, 40],
    &[20, 31, 33, 41],
    &[21, 32, 34],
    &[22, 33, 35],
    &[23, 34],
    &[27, 37],
    &[28, 36, 38],
    &[29, 37],
    &[30, 40],
    &[31, 39, 41],
    &[32, 40],
];

// Rows of LEDs ordered from the far edge inward, each peaking at a
// different point of the breathing cycle.
static WAVE_GROUPS: [WaveGroup<'static>; 4] = [
    WaveGroup {
        leds: &[3, 4, 5, 6, 7, 8],
        offset: 120,
    },
    WaveGroup {
        leds: &[9, 10, 11, 12, 13, 26],
        offset: 70,
    },
    WaveGroup {
        leds: &[14, 15, 16, 17, 18, 25, 0],
        offset: 45,
    },
    WaveGroup {
        leds: &[19, 20, 21, 22, 23, 24, 1, 2],
        offset: 20,
    },
];

/// Left (central) half.
pub static LEFT: Layout<'static> = Layout::new(&LEFT_KEY_TO_LED, &LEFT_LED_TO_KEY, &ADJACENCY)
    .with_wave_groups(&WAVE_GROUPS)
    .with_backlight_leds(BACKLIGHT_LEDS);

/// Right (peripheral) half.
pub static RIGHT: Layout<'static> = Layout::new(&RIGHT_KEY_TO_LED, &RIGHT_LED_TO_KEY, &ADJACENCY)
    .with_wave_groups(&WAVE_GROUPS)
    .with_backlight_leds(BACKLIGHT_LEDS);
