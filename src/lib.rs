#![no_std]

pub mod color;
pub mod config;
pub mod effect;
pub mod engine;
pub mod error;
pub mod heatmap;
pub mod key_event;
pub mod layout;
#[cfg(feature = "esp32-log")]
pub mod logger;
pub mod ripple;
pub mod router;
pub mod scheduler;
pub mod sink;
pub mod state;

use core::convert::Infallible;
use core::fmt::Debug;

pub use color::{BrightnessRange, Hsb, Rgb, hsb_to_rgb};
pub use config::{RippleConfig, UnderglowConfig};
pub use effect::{EffectId, EffectSlot};
pub use engine::Underglow;
pub use error::{Result, UnderglowError};
pub use key_event::{KeyEvent, KeyEventQueue, KeyEventReceiver, KeyEventSender};
pub use layout::{Layout, WaveGroup};
pub use scheduler::{TickResult, TickScheduler};
pub use sink::StripSink;
pub use state::{AnimationState, STATE_RECORD_LEN, Speed, StateRecord};

pub use embassy_time::{Duration, Instant};

/// Abstract LED strip sink
///
/// Receives the full pixel buffer once per tick. A failed delivery is logged
/// and the next tick goes ahead as usual.
pub trait PixelSink {
    type Error: Debug;

    /// Push `pixels` to the strip, in physical strip order
    fn deliver(&mut self, pixels: &[Rgb]) -> core::result::Result<(), Self::Error>;
}

/// Power rail feeding the LEDs
///
/// Switched on and off together with the underglow. Failures are logged only.
pub trait PowerRail {
    type Error: Debug;

    fn enable(&mut self) -> core::result::Result<(), Self::Error>;

    fn disable(&mut self) -> core::result::Result<(), Self::Error>;
}

/// Persistent storage for the [`AnimationState`] record
pub trait StateStore {
    type Error: Debug;

    /// Read the stored record, `None` if nothing was saved yet
    fn load(&mut self) -> core::result::Result<Option<StateRecord>, Self::Error>;

    /// Store `record`, replacing any previous one
    fn save(&mut self, record: &StateRecord) -> core::result::Result<(), Self::Error>;
}

/// No power rail to switch.
impl PowerRail for () {
    type Error = Infallible;

    fn enable(&mut self) -> core::result::Result<(), Infallible> {
        Ok(())
    }

    fn disable(&mut self) -> core::result::Result<(), Infallible> {
        Ok(())
    }
}

/// Nothing is persisted.
impl StateStore for () {
    type Error = Infallible;

    fn load(&mut self) -> core::result::Result<Option<StateRecord>, Infallible> {
        Ok(None)
    }

    fn save(&mut self, _record: &StateRecord) -> core::result::Result<(), Infallible> {
        Ok(())
    }
}
