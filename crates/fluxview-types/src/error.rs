//! Error types for fluxview-types.

use thiserror::Error;
use time::PrimitiveDateTime;

/// Errors that can occur when parsing user-facing values such as channel names.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The name does not match any sensor channel.
    #[error("Unknown channel '{0}'. Valid channels: flux, temperature, pressure, humidity")]
    UnknownChannel(String),
}

/// Errors raised when building a [`DateWindow`](crate::DateWindow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WindowError {
    /// The window would begin after it ends.
    #[error("Window begins at {begin} which is after its end {end}")]
    Inverted {
        begin: PrimitiveDateTime,
        end: PrimitiveDateTime,
    },
}
