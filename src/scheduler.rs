//! Tick scheduling
//!
//! Portable tick pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between calls.

use embassy_time::{Duration, Instant};

use crate::engine::Underglow;
use crate::key_event::KeyEventReceiver;
use crate::{PixelSink, PowerRail, StateStore};

/// Result of a service pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// A frame was rendered and delivered during this pass.
    pub rendered: bool,
    /// When `service` should be called next, `None` while idle.
    pub next_deadline: Option<Instant>,
    /// How long to wait until `next_deadline` (zero if already due).
    pub sleep_duration: Option<Duration>,
}

/// Drives an [`Underglow`] engine: drains key events, renders on the tick
/// period, and flushes debounced saves.
///
/// Ticks are spaced a fixed period after the previous one ran. A slow sink
/// pushes the next tick back instead of causing a catch-up burst.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = TickScheduler::with_events(QUEUE.receiver());
///
/// loop {
///     let result = scheduler.service(&mut underglow, Instant::now());
///     match result.sleep_duration {
///         Some(duration) => sleep(duration),
///         None => wait_for_wakeup(),
///     }
/// }
/// ```
pub struct TickScheduler<'q, const QUEUE: usize> {
    events: Option<KeyEventReceiver<'q, QUEUE>>,
    next_tick: Option<Instant>,
}

impl<const QUEUE: usize> Default for TickScheduler<'_, QUEUE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'q, const QUEUE: usize> TickScheduler<'q, QUEUE> {
    /// Scheduler without a key event queue; events go through
    /// [`Underglow::handle_key_event`] directly.
    pub const fn new() -> Self {
        Self {
            events: None,
            next_tick: None,
        }
    }

    /// Scheduler draining `events` on every pass.
    pub const fn with_events(events: KeyEventReceiver<'q, QUEUE>) -> Self {
        Self {
            events: Some(events),
            next_tick: None,
        }
    }

    /// Deadline of the next tick, `None` while the engine is off.
    pub const fn next_tick(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Run one service pass.
    ///
    /// 1. Routes every queued key event
    /// 2. Renders and delivers a frame if the engine is on and a tick is due
    ///    (the first tick after switching on is due immediately)
    /// 3. Saves the state if its debounce delay is over
    pub fn service<S, H, const LEDS: usize, const KEYS: usize>(
        &mut self,
        engine: &mut Underglow<'_, S, H, LEDS, KEYS>,
        now: Instant,
    ) -> TickResult
    where
        S: PixelSink,
        H: PowerRail + StateStore,
    {
        if let Some(events) = &self.events {
            while let Some(event) = events.try_receive() {
                engine.handle_key_event(event);
            }
        }

        let mut rendered = false;
        let tick_deadline = if engine.is_on() && engine.is_ready() {
            let due = self.next_tick.unwrap_or(now);
            if now >= due {
                engine.tick();
                rendered = true;
                let next = now + engine.config().tick_period;
                self.next_tick = Some(next);
                Some(next)
            } else {
                Some(due)
            }
        } else {
            self.next_tick = None;
            None
        };

        engine.poll_save(now);

        let next_deadline = match (tick_deadline, engine.save_deadline()) {
            (Some(tick), Some(save)) => Some(tick.min(save)),
            (tick, save) => tick.or(save),
        };

        TickResult {
            rendered,
            next_deadline,
            sleep_duration: next_deadline.map(|deadline| deadline.saturating_duration_since(now)),
        }
    }
}
