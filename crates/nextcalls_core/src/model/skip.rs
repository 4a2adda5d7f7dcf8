//! Per-item filtering outcomes.

use std::fmt::{Display, Formatter};

/// Reason one reminder or contact contributes nothing to a derivation pass.
///
/// These are expected outcomes, not failures: callers drop the item and
/// continue with the rest of the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Reminder record has no title.
    NoTitle,
    /// Contact record has no phone number, or it normalizes to nothing.
    NoPhone,
    /// Reminder title contains no recognizable phone number.
    NoPhoneFound,
}

impl SkipReason {
    /// Stable code used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoTitle => "no_title",
            Self::NoPhone => "no_phone",
            Self::NoPhoneFound => "no_phone_found",
        }
    }
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoTitle => write!(f, "reminder does not have a title"),
            Self::NoPhone => write!(f, "contact does not have a phone number"),
            Self::NoPhoneFound => write!(f, "reminder does not contain a phone number"),
        }
    }
}
