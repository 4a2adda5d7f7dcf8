//! Reminder and contact provider contracts.
//!
//! # Responsibility
//! - Define the async capability traits the engine is built from.
//! - Map provider authorization states to access results.
//! - Ship in-memory and JSON-fixture provider implementations.
//!
//! # Invariants
//! - `read_all` fails with `AccessDenied` until access has been granted.
//! - Reminder sources only return incomplete, titled reminders from the
//!   configured list (every list when none is configured).
//! - Contact sources only return contacts that carry a phone number.

pub mod access;
pub mod cached;
pub mod contact;
pub mod error;
pub mod fixture;
pub mod memory;
pub mod reminder;
