//! Error types for Hireboard.

use alloc::string::String;
use core::fmt;

/// Result type alias for Hireboard operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for Hireboard operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Network, authentication or backend rejection on load, subscribe or mutate.
    Transport {
        /// HTTP-like status code, when the backend returned one.
        status: Option<u16>,
        message: String,
    },
    /// Mutation target does not exist at the backend.
    NotFound {
        id: String,
    },
    /// Add-candidate input failed validation.
    InvalidDraft {
        field: &'static str,
        message: String,
    },
    /// A backend payload could not be decoded into a candidate.
    Decode {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport {
                status: Some(status),
                message,
            } => write!(f, "Transport error ({}): {}", status, message),
            Error::Transport {
                status: None,
                message,
            } => write!(f, "Transport error: {}", message),
            Error::NotFound { id } => write!(f, "Candidate not found: {}", id),
            Error::InvalidDraft { field, message } => {
                write!(f, "Invalid {}: {}", field, message)
            }
            Error::Decode { message } => write!(f, "Decode error: {}", message),
        }
    }
}

impl Error {
    /// Creates a transport error without a status code.
    pub fn transport(message: impl Into<String>) -> Self {
        Error::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a transport error carrying the backend's status code.
    pub fn transport_status(status: u16, message: impl Into<String>) -> Self {
        Error::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Error::NotFound { id: id.into() }
    }

    /// Creates an invalid draft error.
    pub fn invalid_draft(field: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidDraft {
            field,
            message: message.into(),
        }
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }

    /// Returns true if the mutation target was already gone.
    ///
    /// Such failures are treated as resolved rather than surfaced.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
