//! Keyboard layout descriptors
//!
//! A [`Layout`] ties key positions to LEDs and describes which keys are
//! physically next to each other. Tables are supplied as data so the engine
//! does not depend on any particular keyboard.

pub mod corne;

/// Brightness offset used for LEDs outside every wave group.
pub const DEFAULT_WAVE_OFFSET: u8 = 100;

/// LEDs sharing one peak-brightness offset in the wave effect.
#[derive(Debug, Clone, Copy)]
pub struct WaveGroup<'a> {
    pub leds: &'a [u8],
    pub offset: u8,
}

/// Static wiring and adjacency data for one keyboard (half).
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    key_to_led: &'a [Option<u8>],
    led_to_key: &'a [Option<u8>],
    adjacency: &'a [&'a [u8]],
    wave_groups: &'a [WaveGroup<'a>],
    backlight_leds: usize,
}

impl<'a> Layout<'a> {
    /// Create a layout.
    ///
    /// `adjacency[key]` lists the neighbors of `key` in discovery order. The
    /// graph is used as given: an edge listed only one way is only walked one
    /// way.
    pub const fn new(
        key_to_led: &'a [Option<u8>],
        led_to_key: &'a [Option<u8>],
        adjacency: &'a [&'a [u8]],
    ) -> Self {
        Self {
            key_to_led,
            led_to_key,
            adjacency,
            wave_groups: &[],
            backlight_leds: 0,
        }
    }

    /// Set the wave effect groups.
    #[must_use]
    pub const fn with_wave_groups(mut self, groups: &'a [WaveGroup<'a>]) -> Self {
        self.wave_groups = groups;
        self
    }

    /// Set how many leading LEDs are backlight (not tied to any key).
    #[must_use]
    pub const fn with_backlight_leds(mut self, count: usize) -> Self {
        self.backlight_leds = count;
        self
    }

    /// Number of logical key positions.
    pub const fn key_count(&self) -> usize {
        self.key_to_led.len()
    }

    /// Number of leading backlight LEDs.
    pub const fn backlight_leds(&self) -> usize {
        self.backlight_leds
    }

    /// LED index lit by `key`, if the key has one on this half.
    pub fn led_for_key(&self, key: usize) -> Option<usize> {
        self.key_to_led.get(key).copied().flatten().map(usize::from)
    }

    /// Key position under LED `led`, if any.
    pub fn key_for_led(&self, led: usize) -> Option<usize> {
        self.led_to_key.get(led).copied().flatten().map(usize::from)
    }

    /// Neighbors of `key`; empty for unknown keys.
    pub fn neighbors(&self, key: usize) -> &'a [u8] {
        self.adjacency.get(key).copied().unwrap_or(&[])
    }

    /// Wave brightness offset for LED `led`.
    pub fn wave_offset(&self, led: usize) -> u8 {
        self.wave_groups
            .iter()
            .find(|group| group.leds.iter().any(|&l| usize::from(l) == led))
            .map_or(DEFAULT_WAVE_OFFSET, |group| group.offset)
    }
}
