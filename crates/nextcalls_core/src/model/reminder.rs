//! Reminder domain model.
//!
//! # Responsibility
//! - Represent task-list records as reported by a reminder provider.
//! - Convert raw provider records into titled reminders.
//!
//! # Invariants
//! - `Reminder.id` is the provider identity and is used for completion.
//! - A reminder without a title never becomes a `Reminder`.

use crate::model::skip::SkipReason;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one reminder in its provider.
pub type ReminderId = Uuid;

/// Titled, incomplete reminder inspected by call derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    /// Free text scanned for phone numbers and contact aliases.
    pub title: String,
}

impl Reminder {
    /// Creates a reminder with a generated ID.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title)
    }

    /// Creates a reminder with a provider-assigned ID.
    pub fn with_id(id: ReminderId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    /// Converts a raw provider record into a reminder.
    ///
    /// Returns `SkipReason::NoTitle` when the record has no title. Completion
    /// state and list membership are filtered by the source, not here.
    pub fn from_raw(raw: &RawReminder) -> Result<Self, SkipReason> {
        match raw.title.as_deref() {
            Some(title) => Ok(Self::with_id(raw.id, title)),
            None => Err(SkipReason::NoTitle),
        }
    }
}

/// Reminder record as stored by a task-list provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReminder {
    #[serde(default = "Uuid::new_v4")]
    pub id: ReminderId,
    #[serde(default)]
    pub title: Option<String>,
    /// Name of the task list holding this reminder.
    pub list: String,
    #[serde(default)]
    pub completed: bool,
}

impl RawReminder {
    /// Creates an incomplete, titled raw record in `list`.
    pub fn new(list: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: Some(title.into()),
            list: list.into(),
            completed: false,
        }
    }
}
