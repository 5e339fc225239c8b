#![allow(dead_code)]

use keyglow::layout::corne;
use keyglow::{
    AnimationState, EffectId, Hsb, PixelSink, PowerRail, Rgb, Speed, StateRecord, StateStore,
    Underglow, UnderglowConfig,
};

pub const LEDS: usize = corne::LED_COUNT;
pub const KEYS: usize = corne::KEY_COUNT;

pub type TestUnderglow = Underglow<'static, RecordingSink, MockHooks, LEDS, KEYS>;

/// Sink keeping every delivered frame.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<Vec<Rgb>>,
    pub fail: bool,
}

impl PixelSink for RecordingSink {
    type Error = &'static str;

    fn deliver(&mut self, pixels: &[Rgb]) -> Result<(), Self::Error> {
        if self.fail {
            return Err("strip rejected the frame");
        }
        self.frames.push(pixels.to_vec());
        Ok(())
    }
}

/// Power rail and store recording every call.
#[derive(Debug, Default)]
pub struct MockHooks {
    pub stored: Option<StateRecord>,
    pub saves: usize,
    pub power: Vec<bool>,
}

impl PowerRail for MockHooks {
    type Error = ();

    fn enable(&mut self) -> Result<(), ()> {
        self.power.push(true);
        Ok(())
    }

    fn disable(&mut self) -> Result<(), ()> {
        self.power.push(false);
        Ok(())
    }
}

impl StateStore for MockHooks {
    type Error = ();

    fn load(&mut self) -> Result<Option<StateRecord>, ()> {
        Ok(self.stored)
    }

    fn save(&mut self, record: &StateRecord) -> Result<(), ()> {
        self.stored = Some(*record);
        self.saves += 1;
        Ok(())
    }
}

/// Start state: off, solid red, speed 3.
pub fn config_starting_off() -> UnderglowConfig {
    UnderglowConfig {
        start: AnimationState {
            color: Hsb::new(0, 100, 100),
            speed: Speed::new(3),
            effect: EffectId::Solid,
            step: 0,
            on: false,
        },
        ..UnderglowConfig::default()
    }
}

/// Engine on the left Corne half with a bound sink, switched on.
pub fn running_engine() -> TestUnderglow {
    let mut engine = TestUnderglow::new(corne::LEFT, config_starting_off(), MockHooks::default());
    engine.bind(RecordingSink::default());
    engine.turn_on().unwrap();
    engine
}

pub fn delivered(engine: &TestUnderglow) -> &[Vec<Rgb>] {
    &engine.sink().unwrap().frames
}
