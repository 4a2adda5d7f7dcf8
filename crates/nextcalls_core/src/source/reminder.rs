//! Reminder provider contract.

use crate::model::reminder::{RawReminder, Reminder};
use crate::source::error::{SourceError, SourceResult};
use async_trait::async_trait;
use log::debug;
use std::collections::BTreeSet;

/// Task-list provider consumed by the call engine.
#[async_trait]
pub trait ReminderSource: Send + Sync {
    /// Ensures the app may read and complete reminders, prompting if needed.
    async fn request_access(&self) -> SourceResult<()>;

    /// Reads incomplete, titled reminders from `list_name`.
    ///
    /// An empty `list_name` reads every list.
    async fn read_all(&self, list_name: &str) -> SourceResult<Vec<Reminder>>;

    /// Marks `reminder` as completed in the provider.
    async fn complete(&self, reminder: &Reminder) -> SourceResult<()>;

    /// Returns the names of all reminder lists, sorted and unique.
    async fn list_available_lists(&self) -> SourceResult<Vec<String>>;
}

/// Applies the read contract to raw provider records.
///
/// Keeps records in provider order. Fails with `ListNotFound` when
/// `list_name` is set but absent from `known_lists`.
pub fn select_reminders(
    raw: &[RawReminder],
    list_name: &str,
    known_lists: &BTreeSet<String>,
) -> SourceResult<Vec<Reminder>> {
    if !list_name.is_empty() && !known_lists.contains(list_name) {
        return Err(SourceError::ListNotFound(list_name.to_string()));
    }

    let reminders = raw
        .iter()
        .filter(|record| !record.completed)
        .filter(|record| list_name.is_empty() || record.list == list_name)
        .filter_map(|record| match Reminder::from_raw(record) {
            Ok(reminder) => Some(reminder),
            Err(reason) => {
                debug!(
                    "event=reminder_read module=source status=skip reminder_id={} reason={}",
                    record.id,
                    reason.as_str()
                );
                None
            }
        })
        .collect();
    Ok(reminders)
}

/// Collects the list names referenced by raw records plus `extra` names.
pub fn known_list_names<'a>(
    raw: &'a [RawReminder],
    extra: impl IntoIterator<Item = &'a String>,
) -> BTreeSet<String> {
    raw.iter()
        .map(|record| &record.list)
        .chain(extra)
        .filter(|name| !name.trim().is_empty())
        .cloned()
        .collect()
}
