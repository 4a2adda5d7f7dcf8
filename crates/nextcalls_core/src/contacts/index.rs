//! Contact alias indexer.

use crate::model::contact::{Contact, Phone, RawContact};
use crate::model::skip::SkipReason;

/// Builds the alias sequence for one directory record.
///
/// Candidates, in order: `"family given"`, `"family, given"`,
/// `"given family"`, `"given, family"`, `nickname`, `organization_name`.
/// Each is lowercased and trimmed; empty candidates and a bare `","` are
/// dropped. Duplicates are kept.
pub fn index_aliases(
    family_name: &str,
    given_name: &str,
    nickname: &str,
    organization_name: &str,
) -> Vec<String> {
    [
        format!("{family_name} {given_name}"),
        format!("{family_name}, {given_name}"),
        format!("{given_name} {family_name}"),
        format!("{given_name}, {family_name}"),
        nickname.to_string(),
        organization_name.to_string(),
    ]
    .iter()
    .map(|candidate| candidate.to_lowercase().trim().to_string())
    .filter(|alias| !alias.is_empty() && alias != ",")
    .collect()
}

/// Indexes a raw directory record into a matchable contact.
///
/// The first phone number is used. Returns `SkipReason::NoPhone` when the
/// record has none.
pub fn index_contact(raw: &RawContact) -> Result<Contact, SkipReason> {
    let first = raw.phone_numbers.first().ok_or(SkipReason::NoPhone)?;
    let aliases = index_aliases(
        &raw.family_name,
        &raw.given_name,
        &raw.nickname,
        &raw.organization_name,
    );
    Ok(Contact::new(
        aliases,
        Phone::new(first.description.as_str(), first.number.as_str()),
    ))
}

#[cfg(test)]
mod tests {
    use super::{index_aliases, index_contact};
    use crate::model::contact::{RawContact, RawPhone};
    use crate::model::skip::SkipReason;

    #[test]
    fn builds_aliases_in_fixed_order() {
        let aliases = index_aliases("Vermeulen", "Joske", "Jos", "ACME NV");
        assert_eq!(
            aliases,
            vec![
                "vermeulen joske",
                "vermeulen, joske",
                "joske vermeulen",
                "joske, vermeulen",
                "jos",
                "acme nv",
            ]
        );
    }

    #[test]
    fn drops_empty_and_lone_separator_candidates() {
        let aliases = index_aliases("", "", "", "Garage Peeters");
        assert_eq!(aliases, vec!["garage peeters"]);
    }

    #[test]
    fn keeps_duplicates_and_trims_single_names() {
        let aliases = index_aliases("", "Joske", "joske", "");
        assert_eq!(
            aliases,
            vec!["joske", ", joske", "joske", "joske,", "joske"]
        );
    }

    #[test]
    fn record_without_names_yields_no_aliases() {
        let raw = RawContact {
            phone_numbers: vec![RawPhone {
                description: "mobile".to_string(),
                number: "0477 12 34 56".to_string(),
            }],
            ..RawContact::default()
        };
        let contact = index_contact(&raw).expect("record with phone should index");
        assert!(contact.aliases.is_empty());
        assert_eq!(contact.phone.number, "0477 12 34 56");
        assert_eq!(contact.phone.raw_description, "mobile");
    }

    #[test]
    fn uses_first_phone_number() {
        let mut raw = RawContact::person("Joske", "Vermeulen", "+32 477 88 55 66");
        raw.phone_numbers.push(RawPhone {
            description: "work".to_string(),
            number: "03 770 03 04".to_string(),
        });
        let contact = index_contact(&raw).expect("record should index");
        assert_eq!(contact.phone.number, "+32 477 88 55 66");
    }

    #[test]
    fn record_without_phone_is_skipped() {
        let raw = RawContact {
            given_name: "Joske".to_string(),
            ..RawContact::default()
        };
        assert_eq!(index_contact(&raw), Err(SkipReason::NoPhone));
    }
}
