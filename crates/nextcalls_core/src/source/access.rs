//! Provider authorization states.

use crate::source::error::{SourceError, SourceResult};
use serde::{Deserialize, Serialize};

/// Authorization state reported by a platform provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessStatus {
    Authorized,
    FullAccess,
    NotDetermined,
    Denied,
    Restricted,
    WriteOnly,
    Limited,
    Unknown,
}

/// Outcome of an access check before any prompt is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessCheck {
    Granted,
    /// The user has not decided yet; the provider must prompt.
    Prompt,
    Refused(SourceError),
}

/// Maps a reminder provider status to an access check.
pub fn check_reminder_access(status: AccessStatus) -> AccessCheck {
    match status {
        AccessStatus::Authorized | AccessStatus::FullAccess => AccessCheck::Granted,
        AccessStatus::NotDetermined => AccessCheck::Prompt,
        AccessStatus::Denied => AccessCheck::Refused(SourceError::AccessDenied),
        AccessStatus::Restricted | AccessStatus::WriteOnly | AccessStatus::Limited => {
            AccessCheck::Refused(SourceError::AccessRestricted)
        }
        AccessStatus::Unknown => AccessCheck::Refused(SourceError::Unknown),
    }
}

/// Maps a contact provider status to an access check.
pub fn check_contact_access(status: AccessStatus) -> AccessCheck {
    match status {
        AccessStatus::Authorized | AccessStatus::FullAccess => AccessCheck::Granted,
        AccessStatus::NotDetermined => AccessCheck::Prompt,
        AccessStatus::Denied => AccessCheck::Refused(SourceError::AccessDenied),
        AccessStatus::Restricted | AccessStatus::WriteOnly => {
            AccessCheck::Refused(SourceError::AccessRestricted)
        }
        AccessStatus::Limited => AccessCheck::Refused(SourceError::LimitedAccess),
        AccessStatus::Unknown => AccessCheck::Refused(SourceError::Unknown),
    }
}

/// Resolves a prompt answer into an access result.
pub fn prompt_result(granted: bool) -> SourceResult<()> {
    if granted {
        Ok(())
    } else {
        Err(SourceError::AccessDenied)
    }
}

/// Returns whether `status` allows reading records.
pub fn is_readable(status: AccessStatus) -> bool {
    matches!(status, AccessStatus::Authorized | AccessStatus::FullAccess)
}
