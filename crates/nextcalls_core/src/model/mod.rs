//! Domain model for reminders, contacts and derived calls.
//!
//! # Responsibility
//! - Define the records read from reminder/contact providers.
//! - Define the `Call` value produced by derivation passes.
//!
//! # Invariants
//! - Every `Call` carries a non-empty, normalized phone number.
//! - A `Call` owns a copy of the reminder it was derived from.

pub mod call;
pub mod contact;
pub mod reminder;
pub mod skip;
