//! Contact alias indexing and reminder matching.
//!
//! # Responsibility
//! - Derive lowercase lookup aliases from raw directory records.
//! - Match reminder titles against contact aliases.
//!
//! # Invariants
//! - Alias order is fixed and duplicates are preserved.
//! - Matching is a case-insensitive substring test.

pub mod index;
pub mod matcher;
