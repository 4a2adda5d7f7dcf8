//! Phone number canonicalization and extraction.
//!
//! # Responsibility
//! - Strip a raw phone string down to its dialable form.
//! - Find the first embedded phone number in free text.
//!
//! # Invariants
//! - Normalization is pure and idempotent.
//! - Extraction returns the matched text unnormalized.

pub mod extract;
pub mod normalize;
