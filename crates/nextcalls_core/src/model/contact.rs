//! Contact domain model.
//!
//! # Responsibility
//! - Represent directory records as reported by a contact provider.
//! - Hold the derived alias set used for reminder matching.
//!
//! # Invariants
//! - `Contact.aliases` are lowercase and trimmed; they may be empty, in
//!   which case the contact never matches.
//! - `Phone.number` is kept exactly as the provider reported it.

use serde::{Deserialize, Serialize};

/// Phone number attached to a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    /// Provider description of the number (label, formatting hints).
    pub raw_description: String,
    /// Dialable representation before normalization.
    pub number: String,
}

impl Phone {
    pub fn new(raw_description: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            raw_description: raw_description.into(),
            number: number.into(),
        }
    }
}

/// Indexed contact ready for alias matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub aliases: Vec<String>,
    pub phone: Phone,
}

impl Contact {
    pub fn new(aliases: Vec<String>, phone: Phone) -> Self {
        Self { aliases, phone }
    }
}

/// One phone entry on a raw directory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPhone {
    #[serde(default)]
    pub description: String,
    pub number: String,
}

/// Directory record as reported by a contact provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawContact {
    pub family_name: String,
    pub given_name: String,
    pub nickname: String,
    pub organization_name: String,
    /// Only the first entry is used for calls.
    pub phone_numbers: Vec<RawPhone>,
}

impl RawContact {
    /// Creates a record with a given/family name and one phone number.
    pub fn person(
        given_name: impl Into<String>,
        family_name: impl Into<String>,
        number: impl Into<String>,
    ) -> Self {
        Self {
            family_name: family_name.into(),
            given_name: given_name.into(),
            phone_numbers: vec![RawPhone {
                description: String::new(),
                number: number.into(),
            }],
            ..Self::default()
        }
    }
}
