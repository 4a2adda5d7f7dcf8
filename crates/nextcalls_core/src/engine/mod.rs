//! Call derivation engine.
//!
//! # Responsibility
//! - Own the current call list and re-derive it from the providers.
//! - Complete calls through the reminder provider.
//! - Publish list changes and failures to subscribers.
//!
//! # Invariants
//! - The list is replaced wholesale; readers see the old or the new list,
//!   never a partial one.
//! - Concurrent refreshes are not serialized: the last pass to finish wins.
//! - Provider failures leave the list unchanged and never panic.

pub mod call_engine;
pub mod error;
pub mod events;
