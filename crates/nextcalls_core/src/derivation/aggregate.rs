//! Inline extraction and call aggregation.

use crate::contacts::matcher::match_contacts;
use crate::model::call::Call;
use crate::model::contact::Contact;
use crate::model::reminder::Reminder;
use log::{debug, info};

/// Produces one call per reminder whose title embeds a phone number.
///
/// Reminders without a number contribute nothing.
pub fn extract_inline(reminders: &[Reminder]) -> Vec<Call> {
    reminders
        .iter()
        .filter_map(|reminder| match Call::from_inline(reminder) {
            Ok(call) => Some(call),
            Err(reason) => {
                debug!(
                    "event=inline_extract module=derivation status=skip reminder_id={} reason={}",
                    reminder.id,
                    reason.as_str()
                );
                None
            }
        })
        .collect()
}

/// Concatenates inline calls and contact calls, inline first.
///
/// Each input keeps its internal order.
pub fn aggregate(inline_calls: Vec<Call>, contact_calls: Vec<Call>) -> Vec<Call> {
    let mut calls = inline_calls;
    calls.extend(contact_calls);
    calls
}

/// Runs both extraction paths over one snapshot and merges the results.
pub fn derive_calls(reminders: &[Reminder], contacts: &[Contact]) -> Vec<Call> {
    let inline_calls = extract_inline(reminders);
    let contact_calls = match_contacts(reminders, contacts);
    info!(
        "event=calls_derive module=derivation status=ok reminders={} contacts={} inline_calls={} contact_calls={}",
        reminders.len(),
        contacts.len(),
        inline_calls.len(),
        contact_calls.len()
    );
    aggregate(inline_calls, contact_calls)
}

#[cfg(test)]
mod tests {
    use super::{aggregate, derive_calls, extract_inline};
    use crate::model::call::{Call, CallOrigin};
    use crate::model::contact::{Contact, Phone};
    use crate::model::reminder::Reminder;

    fn joske() -> Contact {
        Contact::new(
            vec!["joske vermeulen".to_string()],
            Phone::new("", "+32 477 88 55 66"),
        )
    }

    #[test]
    fn extract_inline_skips_reminders_without_numbers() {
        let reminders = vec![
            Reminder::new("no phone number"),
            Reminder::new("Item 0477 40 30 40"),
            Reminder::new("no phone number 23"),
        ];
        let calls = extract_inline(&reminders);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].reminder.id, reminders[1].id);
    }

    #[test]
    fn aggregate_keeps_inline_calls_first() {
        let a = Reminder::new("a 0477403040");
        let b = Reminder::new("b 037700304");
        let inline = vec![
            Call::from_inline(&a).expect("inline a"),
            Call::from_inline(&b).expect("inline b"),
        ];
        let contact = vec![Call::from_contact(&a, &joske()).expect("contact a")];
        let expected: Vec<_> = inline.iter().chain(&contact).map(|c| c.id).collect();

        let merged = aggregate(inline, contact);
        let ids: Vec<_> = merged.iter().map(|c| c.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn dual_path_reminder_yields_two_distinct_calls() {
        let reminder = Reminder::new("Joske Vermeulen of 0499 11 22 33");
        let calls = derive_calls(&[reminder.clone()], &[joske()]);

        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].origin, CallOrigin::Inline);
        assert_eq!(calls[0].phone, "0499112233");
        assert_eq!(calls[1].origin, CallOrigin::Contact);
        assert_eq!(calls[1].phone, "+32477885566");
        assert_ne!(calls[0].id, calls[1].id);
        assert!(calls.iter().all(|call| call.reminder.id == reminder.id));
    }
}
