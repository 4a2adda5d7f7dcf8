//! Engine change notifications.

use crate::engine::error::EngineError;
use crate::model::call::CallId;

/// Event published by the engine on its broadcast channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallListEvent {
    /// A refresh installed a new list of `count` calls.
    CallsInstalled { count: usize },
    /// One call was removed after its reminder was completed.
    CallRemoved { call_id: CallId },
    /// A refresh failed; the list is unchanged.
    RefreshFailed { error: EngineError },
    /// Completing a call failed; the list is unchanged.
    CompleteFailed { call_id: CallId, error: EngineError },
}

/// Coarse engine activity state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    /// At least one refresh pass is in flight.
    Fetching,
}

/// Result of [`complete`](crate::engine::call_engine::CallDerivationEngine::complete).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompleteOutcome {
    /// The reminder was completed and the call removed from the list.
    Removed,
    /// The call is not (or no longer) in the current list.
    NotPresent,
}
