//! In-memory provider implementations.
//!
//! Used by tests and by hosts that push provider records into the engine
//! themselves. Authorization states, prompt answers and failures can be
//! scripted per instance.

use crate::model::contact::{Contact, RawContact};
use crate::model::reminder::{RawReminder, Reminder};
use crate::source::access::{
    check_contact_access, check_reminder_access, is_readable, prompt_result, AccessCheck,
    AccessStatus,
};
use crate::source::contact::{index_raw_contacts, ContactSource};
use crate::source::error::{SourceError, SourceResult};
use crate::source::reminder::{known_list_names, select_reminders, ReminderSource};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

struct ReminderState {
    status: AccessStatus,
    grant_on_prompt: bool,
    records: Vec<RawReminder>,
    lists: Vec<String>,
    read_failure: Option<SourceError>,
    complete_failure: Option<SourceError>,
}

/// In-memory reminder provider.
pub struct MemoryReminderSource {
    state: RwLock<ReminderState>,
}

impl MemoryReminderSource {
    /// Creates a fully authorized provider holding `records`.
    pub fn new(records: Vec<RawReminder>) -> Self {
        Self {
            state: RwLock::new(ReminderState {
                status: AccessStatus::FullAccess,
                grant_on_prompt: true,
                records,
                lists: Vec::new(),
                read_failure: None,
                complete_failure: None,
            }),
        }
    }

    /// Sets the authorization state reported before any prompt.
    pub async fn set_access_status(&self, status: AccessStatus) {
        self.state.write().await.status = status;
    }

    /// Sets the answer given when the provider has to prompt.
    pub async fn set_grant_on_prompt(&self, granted: bool) {
        self.state.write().await.grant_on_prompt = granted;
    }

    /// Declares lists that exist even when they hold no reminders.
    pub async fn add_list(&self, name: impl Into<String>) {
        self.state.write().await.lists.push(name.into());
    }

    /// Replaces every stored record.
    pub async fn set_records(&self, records: Vec<RawReminder>) {
        self.state.write().await.records = records;
    }

    /// Appends one record.
    pub async fn push(&self, record: RawReminder) {
        self.state.write().await.records.push(record);
    }

    /// Returns a copy of every stored record, completed ones included.
    pub async fn records(&self) -> Vec<RawReminder> {
        self.state.read().await.records.clone()
    }

    /// Makes every following read fail with `failure` until cleared.
    pub async fn fail_reads(&self, failure: Option<SourceError>) {
        self.state.write().await.read_failure = failure;
    }

    /// Makes every following completion fail with `failure` until cleared.
    pub async fn fail_completes(&self, failure: Option<SourceError>) {
        self.state.write().await.complete_failure = failure;
    }
}

#[async_trait]
impl ReminderSource for MemoryReminderSource {
    async fn request_access(&self) -> SourceResult<()> {
        let mut state = self.state.write().await;
        match check_reminder_access(state.status) {
            AccessCheck::Granted => Ok(()),
            AccessCheck::Prompt => {
                state.status = if state.grant_on_prompt {
                    AccessStatus::FullAccess
                } else {
                    AccessStatus::Denied
                };
                prompt_result(state.grant_on_prompt)
            }
            AccessCheck::Refused(err) => Err(err),
        }
    }

    async fn read_all(&self, list_name: &str) -> SourceResult<Vec<Reminder>> {
        let state = self.state.read().await;
        if !is_readable(state.status) {
            return Err(SourceError::AccessDenied);
        }
        if let Some(failure) = &state.read_failure {
            return Err(failure.clone());
        }
        let lists = known_list_names(&state.records, &state.lists);
        select_reminders(&state.records, list_name, &lists)
    }

    async fn complete(&self, reminder: &Reminder) -> SourceResult<()> {
        let mut state = self.state.write().await;
        if !is_readable(state.status) {
            return Err(SourceError::AccessDenied);
        }
        if let Some(failure) = &state.complete_failure {
            return Err(failure.clone());
        }
        let record = state
            .records
            .iter_mut()
            .find(|record| record.id == reminder.id)
            .ok_or_else(|| {
                SourceError::CompleteFailure(format!("reminder not found: {}", reminder.id))
            })?;
        record.completed = true;
        Ok(())
    }

    async fn list_available_lists(&self) -> SourceResult<Vec<String>> {
        let state = self.state.read().await;
        if !is_readable(state.status) {
            return Err(SourceError::AccessDenied);
        }
        Ok(known_list_names(&state.records, &state.lists)
            .into_iter()
            .collect())
    }
}

struct ContactState {
    status: AccessStatus,
    grant_on_prompt: bool,
    records: Vec<RawContact>,
    read_failure: Option<SourceError>,
}

/// In-memory contact provider.
pub struct MemoryContactSource {
    state: RwLock<ContactState>,
    reads: AtomicUsize,
}

impl MemoryContactSource {
    /// Creates an authorized provider holding `records`.
    pub fn new(records: Vec<RawContact>) -> Self {
        Self {
            state: RwLock::new(ContactState {
                status: AccessStatus::Authorized,
                grant_on_prompt: true,
                records,
                read_failure: None,
            }),
            reads: AtomicUsize::new(0),
        }
    }

    /// Creates an authorized provider with no contacts.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub async fn set_access_status(&self, status: AccessStatus) {
        self.state.write().await.status = status;
    }

    pub async fn set_grant_on_prompt(&self, granted: bool) {
        self.state.write().await.grant_on_prompt = granted;
    }

    pub async fn set_records(&self, records: Vec<RawContact>) {
        self.state.write().await.records = records;
    }

    pub async fn fail_reads(&self, failure: Option<SourceError>) {
        self.state.write().await.read_failure = failure;
    }

    /// Number of successful `read_all` calls served so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContactSource for MemoryContactSource {
    async fn request_access(&self) -> SourceResult<()> {
        let mut state = self.state.write().await;
        match check_contact_access(state.status) {
            AccessCheck::Granted => Ok(()),
            AccessCheck::Prompt => {
                state.status = if state.grant_on_prompt {
                    AccessStatus::Authorized
                } else {
                    AccessStatus::Denied
                };
                prompt_result(state.grant_on_prompt)
            }
            AccessCheck::Refused(err) => Err(err),
        }
    }

    async fn read_all(&self) -> SourceResult<Vec<Contact>> {
        let state = self.state.read().await;
        if !is_readable(state.status) {
            return Err(SourceError::AccessDenied);
        }
        if let Some(failure) = &state.read_failure {
            return Err(failure.clone());
        }
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(index_raw_contacts(&state.records))
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryContactSource, MemoryReminderSource};
    use crate::model::contact::RawContact;
    use crate::model::reminder::{RawReminder, Reminder};
    use crate::source::access::AccessStatus;
    use crate::source::contact::ContactSource;
    use crate::source::error::SourceError;
    use crate::source::reminder::ReminderSource;

    #[tokio::test]
    async fn prompt_grants_reminder_access_once() {
        let source = MemoryReminderSource::new(vec![RawReminder::new("Werk", "bel 0477403040")]);
        source.set_access_status(AccessStatus::NotDetermined).await;

        let err = source.read_all("").await.expect_err("read before access must fail");
        assert_eq!(err, SourceError::AccessDenied);

        source.request_access().await.expect("prompt should grant");
        let reminders = source.read_all("Werk").await.expect("read after grant");
        assert_eq!(reminders.len(), 1);
    }

    #[tokio::test]
    async fn refused_prompt_denies_access() {
        let source = MemoryReminderSource::new(Vec::new());
        source.set_access_status(AccessStatus::NotDetermined).await;
        source.set_grant_on_prompt(false).await;

        let err = source.request_access().await.expect_err("refused prompt");
        assert_eq!(err, SourceError::AccessDenied);
        let err = source.request_access().await.expect_err("still denied");
        assert_eq!(err, SourceError::AccessDenied);
    }

    #[tokio::test]
    async fn completing_marks_record_and_hides_it_from_reads() {
        let record = RawReminder::new("Werk", "bel 0477403040");
        let source = MemoryReminderSource::new(vec![record.clone()]);
        let reminder = Reminder::from_raw(&record).expect("titled");

        source.complete(&reminder).await.expect("complete should succeed");
        assert!(source.records().await[0].completed);
        assert!(source.read_all("Werk").await.expect("read").is_empty());
    }

    #[tokio::test]
    async fn completing_unknown_reminder_fails() {
        let source = MemoryReminderSource::new(Vec::new());
        let err = source
            .complete(&Reminder::new("ghost"))
            .await
            .expect_err("unknown reminder");
        assert!(matches!(err, SourceError::CompleteFailure(_)));
    }

    #[tokio::test]
    async fn lists_include_declared_empty_lists() {
        let source = MemoryReminderSource::new(vec![RawReminder::new("Werk", "x")]);
        source.add_list("Volgende acties").await;
        let lists = source.list_available_lists().await.expect("lists");
        assert_eq!(lists, vec!["Volgende acties", "Werk"]);
    }

    #[tokio::test]
    async fn limited_contact_access_is_refused() {
        let source = MemoryContactSource::empty();
        source.set_access_status(AccessStatus::Limited).await;
        let err = source.request_access().await.expect_err("limited");
        assert_eq!(err, SourceError::LimitedAccess);
    }

    #[tokio::test]
    async fn contacts_without_phone_are_dropped() {
        let source = MemoryContactSource::new(vec![
            RawContact::person("Joske", "Vermeulen", "+32 477 88 55 66"),
            RawContact {
                given_name: "Zonder".to_string(),
                ..RawContact::default()
            },
        ]);
        let contacts = source.read_all().await.expect("read");
        assert_eq!(contacts.len(), 1);
        assert_eq!(source.read_count(), 1);
    }
}
