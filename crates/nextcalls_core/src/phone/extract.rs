//! Pattern-based phone number extraction.
//!
//! # Responsibility
//! - Recognize Belgian/Dutch style mobile, international and landline
//!   numbers inside reminder titles.
//!
//! # Invariants
//! - Shapes are tried as one ordered alternation with leftmost-first
//!   semantics: the earliest starting position wins, and at one position
//!   the first alternative that matches wins.
//! - Only literal spaces are accepted between digit groups.

use once_cell::sync::Lazy;
use regex::Regex;

/// `+32 477 40 30 40`, `+31 6 11223199`, `0477403040`.
const INTERNATIONAL_SHAPE: &str = r"\+?\d{2,3} ?(?:\d{1,3} ?)?(?:\d{2,3} ?){2,4}\d{2,3}";
/// `0 6 11223199`.
const LEADING_ZERO_SHAPE: &str = r"0 ?\d ?\d{2,3} ?\d{2,3} ?\d{2,3}";
/// `037 700 30 40`.
const LANDLINE_SHAPE: &str = r"\d{3,4} ?\d{3} ?\d{2} ?\d{2}";

static PHONE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "{INTERNATIONAL_SHAPE}|{LEADING_ZERO_SHAPE}|{LANDLINE_SHAPE}"
    ))
    .expect("valid phone number regex")
});

/// Returns the first phone-number-shaped substring of `text`.
///
/// The result is not normalized; pass it through
/// [`normalize_phone`](crate::phone::normalize::normalize_phone) before use.
/// Returns `None` when the text holds no recognizable number.
pub fn extract_phone_number(text: &str) -> Option<&str> {
    PHONE_NUMBER_RE.find(text).map(|found| found.as_str())
}
