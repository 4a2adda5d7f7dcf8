//! Provider error taxonomy.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SourceResult<T> = Result<T, SourceError>;

/// Failure reported by a reminder or contact provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The user refused access.
    AccessDenied,
    /// The device or policy does not allow access.
    AccessRestricted,
    /// Only a subset of records is shared with the app.
    LimitedAccess,
    /// Transport or decoding failure while reading records.
    SourceReadFailure(String),
    /// The configured reminder list does not exist.
    ListNotFound(String),
    /// The provider refused to mark a reminder as completed.
    CompleteFailure(String),
    /// Unrecognized authorization state.
    Unknown,
}

impl SourceError {
    /// Stable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AccessDenied => "access_denied",
            Self::AccessRestricted => "access_restricted",
            Self::LimitedAccess => "limited_access",
            Self::SourceReadFailure(_) => "source_read_failure",
            Self::ListNotFound(_) => "list_not_found",
            Self::CompleteFailure(_) => "complete_failure",
            Self::Unknown => "unknown",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccessDenied => write!(f, "the app doesn't have permission to read this source"),
            Self::AccessRestricted => write!(f, "this device doesn't allow access to this source"),
            Self::LimitedAccess => write!(f, "the app only has limited access to this source"),
            Self::SourceReadFailure(message) => write!(f, "failed to read source: {message}"),
            Self::ListNotFound(name) => write!(f, "reminder list not found: `{name}`"),
            Self::CompleteFailure(message) => {
                write!(f, "failed to complete reminder: {message}")
            }
            Self::Unknown => write!(f, "an unknown error occurred"),
        }
    }
}

impl Error for SourceError {}
