//! Error types for projlock.
//!
//! Uses thiserror for derive macros. Every variant belongs to one
//! [`ErrorClass`] so callers can tell a timeout from an I/O fault from a
//! programming mistake without matching on message text.

use crate::exit_codes;
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Coarse classification of a [`ProjlockError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Wait budget exhausted while polling for the lock.
    Timeout,
    /// OS-level failure. Never retried.
    Io,
    /// Double acquire, double release, release without acquire.
    Usage,
    /// Malformed entry name or entry content.
    Validation,
    /// Bad command line input.
    User,
}

/// Main error type for projlock operations.
#[derive(Error, Debug)]
pub enum ProjlockError {
    /// The shared lock could not be acquired within the wait budget.
    #[error("failed to acquire lock: timed out after {}", format_waited(.waited))]
    LockTimeout { waited: Duration },

    /// An I/O operation failed.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// A lock was requested while one is already held.
    #[error("{0} already acquired")]
    AlreadyAcquired(String),

    /// A lock was released without being held.
    #[error("{0} not acquired")]
    NotAcquired(String),

    /// A configuration entry name failed validation.
    #[error("invalid config name: {0}")]
    InvalidEntryName(String),

    /// A configuration entry does not have the expected shape.
    #[error("config {entry} must contain {expected}")]
    InvalidEntry { entry: String, expected: String },

    /// User provided invalid arguments.
    #[error("{0}")]
    UserError(String),
}

impl ProjlockError {
    /// Wrap an I/O error with a short description of what was being done.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        ProjlockError::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn invalid_entry(entry: &str, expected: impl Into<String>) -> Self {
        ProjlockError::InvalidEntry {
            entry: entry.to_string(),
            expected: expected.into(),
        }
    }

    /// Returns the class of this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            ProjlockError::LockTimeout { .. } => ErrorClass::Timeout,
            ProjlockError::Io { .. } => ErrorClass::Io,
            ProjlockError::AlreadyAcquired(_) | ProjlockError::NotAcquired(_) => ErrorClass::Usage,
            ProjlockError::InvalidEntryName(_) | ProjlockError::InvalidEntry { .. } => {
                ErrorClass::Validation
            }
            ProjlockError::UserError(_) => ErrorClass::User,
        }
    }

    /// Returns true if the error is a lock timeout.
    pub fn is_timeout(&self) -> bool {
        self.class() == ErrorClass::Timeout
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self.class() {
            ErrorClass::Timeout => exit_codes::LOCK_TIMEOUT,
            ErrorClass::Io => exit_codes::IO_FAILURE,
            ErrorClass::Usage => exit_codes::USAGE_ERROR,
            ErrorClass::Validation => exit_codes::VALIDATION_FAILURE,
            ErrorClass::User => exit_codes::USER_ERROR,
        }
    }
}

/// Format a wait for messages, rounded to whole milliseconds.
fn format_waited(waited: &Duration) -> humantime::FormattedDuration {
    let millis = u64::try_from(waited.as_millis()).unwrap_or(u64::MAX);
    humantime::format_duration(Duration::from_millis(millis))
}

/// Result type alias for projlock operations.
pub type Result<T> = std::result::Result<T, ProjlockError>;
