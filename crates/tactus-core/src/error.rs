//! Error types for tactus-core.

use crate::event::PointerId;
use crate::geometry::{ScreenPoint, Viewport};
use thiserror::Error;

/// Failure reported by the device sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// Device is gone.
    #[error("device disconnected")]
    Disconnected,

    /// Device cannot accept input right now.
    #[error("device not ready")]
    NotReady,

    /// Device refused a specific request.
    #[error("device rejected request: {0}")]
    Rejected(String),
}

/// Errors raised by touch operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TouchError {
    /// A Down was issued for a pointer that is still down.
    #[error("pointer {id} is already active")]
    PointerAlreadyActive { id: PointerId },

    /// A Move or Up was issued for a pointer that is not down.
    #[error("pointer {id} is not active")]
    PointerNotActive { id: PointerId },

    /// An element reference could not be turned into a point.
    #[error("cannot resolve {target}: {reason}")]
    UnresolvableTarget { target: String, reason: String },

    /// A point falls outside the device surface.
    #[error("point {point} is outside the {viewport} viewport")]
    OutOfViewport { point: ScreenPoint, viewport: Viewport },

    /// The device sink failed; the session can no longer be trusted.
    #[error("device sink unavailable: {0}")]
    SinkUnavailable(#[from] SinkError),

    /// A previous sink failure invalidated this session.
    #[error("session invalidated by an earlier sink failure")]
    SessionInvalidated,
}

impl TouchError {
    /// Whether the error is a state-machine violation (a caller bug).
    #[must_use]
    pub const fn is_state_violation(&self) -> bool {
        matches!(
            self,
            Self::PointerAlreadyActive { .. } | Self::PointerNotActive { .. }
        )
    }

    /// Whether the error ends the session.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::SinkUnavailable(_) | Self::SessionInvalidated)
    }
}

/// Errors loading or validating configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Failed to parse TOML
    #[error("parse error: {0}")]
    Parse(String),

    /// Failed to read file
    #[error("IO error: {0}")]
    Io(String),

    /// Invalid configuration value
    #[error("invalid value: {0}")]
    Invalid(String),
}
