//! Reminder-to-contact alias matcher.

use crate::model::call::Call;
use crate::model::contact::Contact;
use crate::model::reminder::Reminder;
use log::debug;

/// Produces one call per matching (reminder, contact) pair.
///
/// A contact matches a reminder when any of its aliases is a substring of
/// the lowercased title; the first hit settles the pair. Results follow
/// reminder order, then contact order within one reminder; iterating
/// reminders in the outer loop keeps contact calls in reminder input order.
/// Pairs whose contact number normalizes to nothing are dropped.
pub fn match_contacts(reminders: &[Reminder], contacts: &[Contact]) -> Vec<Call> {
    let mut calls = Vec::new();
    for reminder in reminders {
        let title = reminder.title.to_lowercase();
        for contact in contacts {
            if !contact
                .aliases
                .iter()
                .any(|alias| title.contains(alias.as_str()))
            {
                continue;
            }
            match Call::from_contact(reminder, contact) {
                Ok(call) => calls.push(call),
                Err(reason) => debug!(
                    "event=contact_match module=contacts status=skip reminder_id={} reason={}",
                    reminder.id,
                    reason.as_str()
                ),
            }
        }
    }
    calls
}
