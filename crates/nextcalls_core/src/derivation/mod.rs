//! Call derivation pipeline.
//!
//! # Responsibility
//! - Run inline extraction and contact matching over one snapshot.
//! - Merge both result sets into the ordered call list.
//!
//! # Invariants
//! - Inline calls always precede contact calls.
//! - No cross-path deduplication: one reminder may yield one call per path.

pub mod aggregate;
