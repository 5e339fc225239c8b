use thiserror::Error;

/// Errors returned by the underglow engine.
///
/// Failures coming from the tick or key-event paths are logged, not
/// returned: there is no caller to hand them to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UnderglowError {
    /// No pixel sink is bound yet.
    #[error("underglow device is not ready")]
    NotReady,
    /// An argument is outside its accepted range.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// Every ripple tree slot is in use.
    #[error("no free ripple tree")]
    ResourceExhausted,
    /// The pixel sink rejected a frame.
    #[error("pixel sink rejected the frame")]
    DeliveryFailed,
    /// A persisted state record has the wrong size or out-of-range fields.
    #[error("persisted state record is invalid")]
    InvalidStateRecord,
}

pub type Result<T> = core::result::Result<T, UnderglowError>;
