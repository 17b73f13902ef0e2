//! Error types for the Vista view engine.

use alloc::string::String;
use core::fmt;

/// Result type alias for Vista operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Why a delivered record failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationReason {
    /// The record carried no id field.
    MissingId,
    /// The record carried an empty id.
    EmptyId,
    /// The record carried no cursor field.
    MissingCursor,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationReason::MissingId => write!(f, "missing id"),
            ValidationReason::EmptyId => write!(f, "empty id"),
            ValidationReason::MissingCursor => write!(f, "missing cursor"),
        }
    }
}

/// Error types for Vista view operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The live watch failed to establish or emitted an error mid-stream.
    Subscription {
        message: String,
    },
    /// A page fetch request failed.
    Fetch {
        message: String,
    },
    /// A record delivered by a collaborator fails the expected shape.
    Validation {
        reason: ValidationReason,
        detail: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Subscription { message } => {
                write!(f, "Subscription error: {}", message)
            }
            Error::Fetch { message } => {
                write!(f, "Fetch error: {}", message)
            }
            Error::Validation { reason, detail } => {
                write!(f, "Validation error ({}): {}", reason, detail)
            }
        }
    }
}

impl Error {
    /// Creates a subscription error.
    pub fn subscription(message: impl Into<String>) -> Self {
        Error::Subscription {
            message: message.into(),
        }
    }

    /// Creates a fetch error.
    pub fn fetch(message: impl Into<String>) -> Self {
        Error::Fetch {
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(reason: ValidationReason, detail: impl Into<String>) -> Self {
        Error::Validation {
            reason,
            detail: detail.into(),
        }
    }

    /// Returns true if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}
