//! JSON fixture-backed providers.
//!
//! # Responsibility
//! - Read reminders and contacts from one JSON document on disk.
//! - Persist completions back into the same document.
//!
//! # Invariants
//! - The document is re-read on every call; nothing is cached here.
//! - Writes replace the file atomically; readers never see a partial
//!   document.
//! - Completion is a read-modify-write guarded by one writer lock per
//!   source instance.

use crate::model::contact::{Contact, RawContact};
use crate::model::reminder::{RawReminder, Reminder};
use crate::source::contact::{index_raw_contacts, ContactSource};
use crate::source::error::{SourceError, SourceResult};
use crate::source::reminder::{known_list_names, select_reminders, ReminderSource};
use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

/// On-disk fixture layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureDocument {
    /// Lists that exist even when they hold no reminders.
    pub lists: Vec<String>,
    pub reminders: Vec<RawReminder>,
    pub contacts: Vec<RawContact>,
}

/// Loads a fixture document from `path`.
pub async fn load_fixture(path: &Path) -> SourceResult<FixtureDocument> {
    let text = tokio::fs::read_to_string(path).await.map_err(|err| {
        SourceError::SourceReadFailure(format!("cannot read `{}`: {err}", path.display()))
    })?;
    serde_json::from_str(&text).map_err(|err| {
        SourceError::SourceReadFailure(format!("invalid fixture `{}`: {err}", path.display()))
    })
}

/// Writes a fixture document to `path` as pretty-printed JSON.
///
/// The document is written to a temporary sibling and renamed into place,
/// so concurrent readers see either the old or the new document.
pub async fn save_fixture(path: &Path, document: &FixtureDocument) -> SourceResult<()> {
    let text = serde_json::to_string_pretty(document).map_err(|err| {
        SourceError::CompleteFailure(format!("cannot encode fixture: {err}"))
    })?;
    let tmp_path = temp_sibling(path);

    let write_result = async {
        tokio::fs::write(&tmp_path, text).await?;
        match tokio::fs::rename(&tmp_path, path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                tokio::fs::remove_file(path).await?;
                tokio::fs::rename(&tmp_path, path).await
            }
            Err(err) => Err(err),
        }
    }
    .await;

    if let Err(err) = write_result {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(SourceError::CompleteFailure(format!(
            "cannot write `{}`: {err}",
            path.display()
        )));
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "fixture".to_string());
    path.with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4().simple()))
}

/// Reminder provider backed by a fixture document.
pub struct FixtureReminderSource {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FixtureReminderSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl ReminderSource for FixtureReminderSource {
    async fn request_access(&self) -> SourceResult<()> {
        Ok(())
    }

    async fn read_all(&self, list_name: &str) -> SourceResult<Vec<Reminder>> {
        let document = load_fixture(&self.path).await?;
        let lists = known_list_names(&document.reminders, &document.lists);
        select_reminders(&document.reminders, list_name, &lists)
    }

    async fn complete(&self, reminder: &Reminder) -> SourceResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = load_fixture(&self.path).await?;
        let record = document
            .reminders
            .iter_mut()
            .find(|record| record.id == reminder.id)
            .ok_or_else(|| {
                SourceError::CompleteFailure(format!("reminder not found: {}", reminder.id))
            })?;
        record.completed = true;
        save_fixture(&self.path, &document).await?;
        info!(
            "event=reminder_complete module=source status=ok backend=fixture reminder_id={}",
            reminder.id
        );
        Ok(())
    }

    async fn list_available_lists(&self) -> SourceResult<Vec<String>> {
        let document = load_fixture(&self.path).await?;
        Ok(known_list_names(&document.reminders, &document.lists)
            .into_iter()
            .collect())
    }
}

/// Contact provider backed by a fixture document.
pub struct FixtureContactSource {
    path: PathBuf,
}

impl FixtureContactSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ContactSource for FixtureContactSource {
    async fn request_access(&self) -> SourceResult<()> {
        Ok(())
    }

    async fn read_all(&self) -> SourceResult<Vec<Contact>> {
        let document = load_fixture(&self.path).await?;
        Ok(index_raw_contacts(&document.contacts))
    }
}
