//! Persisted app configuration.
//!
//! # Responsibility
//! - Persist which reminder list the engine reads from.
//! - Publish configuration changes to interested tasks.
//!
//! # Invariants
//! - An empty list name means "no list selected" (read every list).
//! - Subscribers are notified only when the stored value actually changes.

pub mod repo;
pub mod service;
