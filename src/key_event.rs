//! Key position events
//!
//! Key scanning usually runs in another context than rendering (an interrupt
//! or another task). [`KeyEventQueue`] is a fixed-size queue guarded by
//! `critical-section` that those contexts push into; the tick scheduler drains
//! it before rendering.

use core::cell::{Cell, RefCell};

use critical_section::Mutex;
use heapless::Deque;

/// A key position changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Logical key position
    pub position: u32,
    /// `true` on press, `false` on release
    pub pressed: bool,
}

impl KeyEvent {
    pub const fn pressed(position: u32) -> Self {
        Self {
            position,
            pressed: true,
        }
    }

    pub const fn released(position: u32) -> Self {
        Self {
            position,
            pressed: false,
        }
    }

    /// Position as an index, `None` if it cannot be one.
    pub fn key(self) -> Option<usize> {
        usize::try_from(self.position).ok()
    }
}

/// Bounded, interrupt-safe queue of key events.
pub struct KeyEventQueue<const SIZE: usize> {
    events: Mutex<RefCell<Deque<KeyEvent, SIZE>>>,
    dropped: Mutex<Cell<u32>>,
}

impl<const SIZE: usize> KeyEventQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            events: Mutex::new(RefCell::new(Deque::new())),
            dropped: Mutex::new(Cell::new(0)),
        }
    }

    /// Get a handle for producers.
    pub const fn sender(&self) -> KeyEventSender<'_, SIZE> {
        KeyEventSender { queue: self }
    }

    /// Get a handle for the consumer.
    pub const fn receiver(&self) -> KeyEventReceiver<'_, SIZE> {
        KeyEventReceiver { queue: self }
    }

    /// Queue an event.
    ///
    /// When the queue is full the event is dropped, counted, and handed
    /// back in `Err`.
    pub fn push(&self, event: KeyEvent) -> Result<(), KeyEvent> {
        critical_section::with(|cs| {
            let result = self.events.borrow(cs).borrow_mut().push_back(event);
            if result.is_err() {
                let dropped = self.dropped.borrow(cs);
                dropped.set(dropped.get().saturating_add(1));
            }
            result
        })
    }

    /// Take the oldest queued event.
    pub fn pop(&self) -> Option<KeyEvent> {
        critical_section::with(|cs| self.events.borrow(cs).borrow_mut().pop_front())
    }

    /// Number of events dropped because the queue was full.
    pub fn dropped(&self) -> u32 {
        critical_section::with(|cs| self.dropped.borrow(cs).get())
    }

    /// Number of events waiting.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.events.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for KeyEventQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle for a [`KeyEventQueue`].
#[derive(Clone, Copy)]
pub struct KeyEventSender<'q, const SIZE: usize> {
    queue: &'q KeyEventQueue<SIZE>,
}

impl<const SIZE: usize> KeyEventSender<'_, SIZE> {
    /// Queue a key event, see [`KeyEventQueue::push`].
    pub fn send(&self, event: KeyEvent) -> Result<(), KeyEvent> {
        self.queue.push(event)
    }
}

/// Consumer handle for a [`KeyEventQueue`].
#[derive(Clone, Copy)]
pub struct KeyEventReceiver<'q, const SIZE: usize> {
    queue: &'q KeyEventQueue<SIZE>,
}

impl<const SIZE: usize> KeyEventReceiver<'_, SIZE> {
    /// Take the oldest queued event.
    pub fn try_receive(&self) -> Option<KeyEvent> {
        self.queue.pop()
    }
}
