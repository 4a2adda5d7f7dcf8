//! Call derivation orchestrator.
//!
//! # Responsibility
//! - Pull reminders and contacts, derive calls and install the result.
//! - Complete one call and splice it out of the current list.
//! - React to reminder list selection changes with a refresh.
//!
//! # Invariants
//! - Each pass works on its own provider snapshot; no scan state is shared.
//! - Installing a list is one assignment under the write lock.
//! - `CallsInstalled` fires once per installed list, `CallRemoved` once per
//!   actual removal.

use crate::derivation::aggregate::derive_calls;
use crate::engine::error::{EngineError, EngineResult, EngineStage};
use crate::engine::events::{CallListEvent, CompleteOutcome, EngineState};
use crate::model::call::{Call, CallId};
use crate::source::contact::ContactSource;
use crate::source::reminder::ReminderSource;
use log::{debug, error, info};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Owns the derived call list and keeps it in step with the providers.
pub struct CallDerivationEngine {
    reminders: Arc<dyn ReminderSource>,
    contacts: Arc<dyn ContactSource>,
    list_selection: watch::Receiver<String>,
    calls: RwLock<Arc<Vec<Call>>>,
    passes_in_flight: AtomicUsize,
    events: broadcast::Sender<CallListEvent>,
}

impl CallDerivationEngine {
    /// Creates an idle engine with an empty call list.
    ///
    /// `list_selection` carries the configured reminder list name, usually
    /// from [`SettingsService::subscribe`](crate::settings::service::SettingsService::subscribe).
    pub fn new(
        reminders: Arc<dyn ReminderSource>,
        contacts: Arc<dyn ContactSource>,
        list_selection: watch::Receiver<String>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            reminders,
            contacts,
            list_selection,
            calls: RwLock::new(Arc::new(Vec::new())),
            passes_in_flight: AtomicUsize::new(0),
            events,
        }
    }

    /// Returns a snapshot of the current call list.
    pub fn calls(&self) -> Arc<Vec<Call>> {
        Arc::clone(&self.calls.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn state(&self) -> EngineState {
        if self.passes_in_flight.load(Ordering::SeqCst) > 0 {
            EngineState::Fetching
        } else {
            EngineState::Idle
        }
    }

    /// Subscribes to list changes and failure reports.
    pub fn subscribe(&self) -> broadcast::Receiver<CallListEvent> {
        self.events.subscribe()
    }

    /// Runs one derivation pass and installs its result.
    ///
    /// Returns the number of installed calls. On failure the current list is
    /// kept, and the error is logged, published as `RefreshFailed` and
    /// returned. Overlapping calls are allowed; the last to finish wins.
    pub async fn refresh(&self) -> EngineResult<usize> {
        let pass = PassGuard::enter(&self.passes_in_flight);
        let started_at = Instant::now();
        info!("event=calls_refresh module=engine status=start");

        match self.derive_pass().await {
            Ok(calls) => {
                let count = calls.len();
                *self.calls.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(calls);
                drop(pass);
                info!(
                    "event=calls_refresh module=engine status=ok count={} duration_ms={}",
                    count,
                    started_at.elapsed().as_millis()
                );
                self.publish(CallListEvent::CallsInstalled { count });
                Ok(count)
            }
            Err(err) => {
                drop(pass);
                error!(
                    "event=calls_refresh module=engine status=error stage={} error_code={} duration_ms={} error={}",
                    err.stage.as_str(),
                    err.source.code(),
                    started_at.elapsed().as_millis(),
                    err
                );
                self.publish(CallListEvent::RefreshFailed { error: err.clone() });
                Err(err)
            }
        }
    }

    /// Completes the reminder behind `call` and removes `call` from the list.
    ///
    /// A call that is not in the current list is a no-op: the provider is not
    /// contacted and `NotPresent` is returned. When a concurrent refresh
    /// drops the call while the provider is completing it, the removal is
    /// skipped and `NotPresent` is returned as well.
    pub async fn complete(&self, call: &Call) -> EngineResult<CompleteOutcome> {
        if !self.contains(call.id) {
            debug!(
                "event=call_complete module=engine status=skip call_id={} reason=not_present",
                call.id
            );
            return Ok(CompleteOutcome::NotPresent);
        }

        if let Err(source) = self.reminders.complete(&call.reminder).await {
            let err = EngineError::new(EngineStage::CompleteReminder, source);
            error!(
                "event=call_complete module=engine status=error call_id={} error_code={} error={}",
                call.id,
                err.source.code(),
                err
            );
            self.publish(CallListEvent::CompleteFailed {
                call_id: call.id,
                error: err.clone(),
            });
            return Err(err);
        }

        if !self.remove(call.id) {
            debug!(
                "event=call_complete module=engine status=skip call_id={} reason=replaced_by_refresh",
                call.id
            );
            return Ok(CompleteOutcome::NotPresent);
        }

        info!(
            "event=call_complete module=engine status=ok call_id={} reminder_id={}",
            call.id, call.reminder.id
        );
        self.publish(CallListEvent::CallRemoved { call_id: call.id });
        Ok(CompleteOutcome::Removed)
    }

    /// Spawns a task refreshing the list on every list selection change.
    ///
    /// The task ends when the settings side of the channel is dropped.
    pub fn watch_list_selection(self: &Arc<Self>) -> JoinHandle<()> {
        let engine = Arc::clone(self);
        let mut selection = self.list_selection.clone();
        tokio::spawn(async move {
            while selection.changed().await.is_ok() {
                let has_selection = !selection.borrow_and_update().is_empty();
                info!(
                    "event=list_selection_change module=engine status=ok has_selection={has_selection}"
                );
                // Failures are already logged and published by refresh.
                let _ = engine.refresh().await;
            }
            debug!("event=list_selection_watch module=engine status=stopped");
        })
    }

    async fn derive_pass(&self) -> EngineResult<Vec<Call>> {
        let list_name = self.list_selection.borrow().clone();

        let reminders = async {
            self.reminders
                .request_access()
                .await
                .map_err(EngineError::at(EngineStage::RequestReminderAccess))?;
            self.reminders
                .read_all(&list_name)
                .await
                .map_err(EngineError::at(EngineStage::ReadReminders))
        };
        let contacts = async {
            self.contacts
                .request_access()
                .await
                .map_err(EngineError::at(EngineStage::RequestContactAccess))?;
            self.contacts
                .read_all()
                .await
                .map_err(EngineError::at(EngineStage::ReadContacts))
        };

        let (reminders, contacts) = tokio::try_join!(reminders, contacts)?;
        Ok(derive_calls(&reminders, &contacts))
    }

    fn contains(&self, call_id: CallId) -> bool {
        self.calls().iter().any(|call| call.id == call_id)
    }

    fn remove(&self, call_id: CallId) -> bool {
        let mut calls = self.calls.write().unwrap_or_else(PoisonError::into_inner);
        if !calls.iter().any(|call| call.id == call_id) {
            return false;
        }
        let remaining: Vec<Call> = calls
            .iter()
            .filter(|call| call.id != call_id)
            .cloned()
            .collect();
        *calls = Arc::new(remaining);
        true
    }

    fn publish(&self, event: CallListEvent) {
        // Err only means nobody is subscribed.
        let _ = self.events.send(event);
    }
}

struct PassGuard<'a>(&'a AtomicUsize);

impl<'a> PassGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::CallDerivationEngine;
    use crate::engine::events::{CallListEvent, CompleteOutcome, EngineState};
    use crate::model::reminder::RawReminder;
    use crate::source::memory::{MemoryContactSource, MemoryReminderSource};
    use std::sync::Arc;
    use tokio::sync::watch;

    fn engine(records: Vec<RawReminder>) -> (CallDerivationEngine, watch::Sender<String>) {
        let (tx, rx) = watch::channel(String::new());
        let engine = CallDerivationEngine::new(
            Arc::new(MemoryReminderSource::new(records)),
            Arc::new(MemoryContactSource::empty()),
            rx,
        );
        (engine, tx)
    }

    #[tokio::test]
    async fn starts_idle_and_empty() {
        let (engine, _tx) = engine(Vec::new());
        assert_eq!(engine.state(), EngineState::Idle);
        assert!(engine.calls().is_empty());
    }

    #[tokio::test]
    async fn refresh_installs_and_announces_list() {
        let (engine, _tx) = engine(vec![RawReminder::new("Werk", "Item 0477403040")]);
        let mut events = engine.subscribe();

        let count = engine.refresh().await.expect("refresh should succeed");
        assert_eq!(count, 1);
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(
            events.recv().await.expect("event"),
            CallListEvent::CallsInstalled { count: 1 }
        );
    }

    #[tokio::test]
    async fn completing_twice_removes_once() {
        let (engine, _tx) = engine(vec![RawReminder::new("Werk", "Item 0477403040")]);
        engine.refresh().await.expect("refresh");
        let call = engine.calls()[0].clone();

        assert_eq!(
            engine.complete(&call).await.expect("first complete"),
            CompleteOutcome::Removed
        );
        assert_eq!(
            engine.complete(&call).await.expect("second complete"),
            CompleteOutcome::NotPresent
        );
        assert!(engine.calls().is_empty());
    }
}
