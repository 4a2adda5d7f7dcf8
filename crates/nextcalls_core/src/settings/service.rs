//! Settings use-case service.
//!
//! # Responsibility
//! - Validate and persist the selected reminder list.
//! - Broadcast the current selection over a `watch` channel.
//!
//! # Invariants
//! - The channel value always equals the persisted value.
//! - A write that fails to persist never reaches subscribers.

use crate::settings::repo::{SettingsError, SettingsRepository, SettingsResult};
use log::info;
use tokio::sync::watch;

/// Settings key holding the selected reminder list name.
pub const SELECTED_LIST_KEY: &str = "selected_reminder_list";
/// List selected by [`SettingsService::reset_to_default`].
pub const DEFAULT_REMINDER_LIST: &str = "Volgende acties";
const MAX_LIST_NAME_CHARS: usize = 256;

/// Settings service over a repository implementation.
pub struct SettingsService<R: SettingsRepository> {
    repo: R,
    selected_list: watch::Sender<String>,
}

impl<R: SettingsRepository> SettingsService<R> {
    /// Loads the persisted selection and creates the service.
    ///
    /// A missing value loads as the empty string.
    pub fn new(repo: R) -> SettingsResult<Self> {
        let stored = repo.get(SELECTED_LIST_KEY)?.unwrap_or_default();
        let (selected_list, _) = watch::channel(stored);
        Ok(Self {
            repo,
            selected_list,
        })
    }

    /// Returns the selected reminder list name (empty when none).
    pub fn selected_list_name(&self) -> String {
        self.selected_list.borrow().clone()
    }

    /// Returns whether a reminder list has been selected.
    pub fn has_selected_list(&self) -> bool {
        !self.selected_list.borrow().is_empty()
    }

    /// Persists a new selection and notifies subscribers when it changed.
    ///
    /// The name is trimmed; an empty name clears the selection.
    pub fn set_selected_list_name(&self, name: &str) -> SettingsResult<()> {
        let normalized = normalize_list_name(name)?;
        self.repo.set(SELECTED_LIST_KEY, &normalized)?;
        let changed = self.selected_list.send_if_modified(|current| {
            if *current == normalized {
                return false;
            }
            current.clone_from(&normalized);
            true
        });
        if changed {
            info!(
                "event=settings_update module=settings status=ok key={SELECTED_LIST_KEY} has_selection={}",
                !normalized.is_empty()
            );
        }
        Ok(())
    }

    /// Selects the default reminder list.
    pub fn reset_to_default(&self) -> SettingsResult<()> {
        self.set_selected_list_name(DEFAULT_REMINDER_LIST)
    }

    /// Subscribes to selection changes.
    ///
    /// The returned receiver treats the current value as already seen.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.selected_list.subscribe()
    }
}

/// Trims and validates a reminder list name.
pub fn normalize_list_name(name: &str) -> SettingsResult<String> {
    let trimmed = name.trim();
    if trimmed.contains(['\n', '\r']) {
        return Err(SettingsError::InvalidListName(
            "must not contain line breaks".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_LIST_NAME_CHARS {
        return Err(SettingsError::InvalidListName(format!(
            "must be at most {MAX_LIST_NAME_CHARS} characters"
        )));
    }
    Ok(trimmed.to_string())
}
