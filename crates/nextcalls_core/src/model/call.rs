//! Call domain model.
//!
//! # Responsibility
//! - Pair one reminder with one normalized phone number.
//! - Build calls from either extraction path.
//!
//! # Invariants
//! - `phone` is non-empty and already normalized.
//! - `id` is freshly generated per derivation and never reused.

use crate::model::contact::Contact;
use crate::model::reminder::Reminder;
use crate::model::skip::SkipReason;
use crate::phone::extract::extract_phone_number;
use crate::phone::normalize::normalize_phone;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of one derived call.
pub type CallId = Uuid;

/// Extraction path that produced a call.
///
/// Informational only: two calls for the same reminder from different
/// origins are distinct values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallOrigin {
    /// Number embedded in the reminder title.
    Inline,
    /// Number taken from a contact whose alias appears in the title.
    Contact,
}

/// Actionable call entry derived from a reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub id: CallId,
    pub reminder: Reminder,
    pub phone: String,
    pub origin: CallOrigin,
}

impl Call {
    /// Builds a call from a number embedded in the reminder title.
    pub fn from_inline(reminder: &Reminder) -> Result<Self, SkipReason> {
        let raw = extract_phone_number(&reminder.title).ok_or(SkipReason::NoPhoneFound)?;
        Self::build(reminder, raw, CallOrigin::Inline).ok_or(SkipReason::NoPhoneFound)
    }

    /// Builds a call from a matched contact's phone number.
    pub fn from_contact(reminder: &Reminder, contact: &Contact) -> Result<Self, SkipReason> {
        Self::build(reminder, &contact.phone.number, CallOrigin::Contact).ok_or(SkipReason::NoPhone)
    }

    /// Returns the `tel://` URL used to place this call.
    pub fn dial_url(&self) -> String {
        format!("tel://{}", self.phone)
    }

    fn build(reminder: &Reminder, raw_phone: &str, origin: CallOrigin) -> Option<Self> {
        let phone = normalize_phone(raw_phone);
        if phone.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            reminder: reminder.clone(),
            phone,
            origin,
        })
    }
}
