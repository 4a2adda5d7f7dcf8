//! Phone number normalization.

/// Removes every whitespace character from `raw`.
///
/// All other characters (digits, a leading `+`, punctuation) are kept in
/// their original order. `normalize_phone(normalize_phone(x)) ==
/// normalize_phone(x)` for every input.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}
