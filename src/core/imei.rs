//! IMEI input masking
//!
//! Total functions that turn raw keystrokes and clipboard text into a
//! canonical IMEI candidate. Only the shape (15 ASCII digits) is checked;
//! the Luhn check digit is left to the backend.

use regex::Regex;
use std::sync::LazyLock;

/// Number of digits in an IMEI.
pub const IMEI_LENGTH: usize = 15;

/// Non-digit keys an IMEI input must always let through.
pub const CONTROL_KEYS: [&str; 7] = [
    "Backspace",
    "Delete",
    "Tab",
    "ArrowLeft",
    "ArrowRight",
    "Home",
    "End",
];

// `\D` would be Unicode-aware; only ASCII digits are kept.
static NON_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]").expect("non-digit pattern is valid"));

static IMEI_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{15}$").expect("IMEI pattern is valid"));

/// Strips every non-digit character and caps the result at 15 digits.
///
/// Never fails: empty, very long, or non-ASCII input all produce a string of
/// 0 to 15 ASCII digits.
pub fn sanitize(raw: &str) -> String {
    let mut digits = NON_DIGIT.replace_all(raw, "").into_owned();
    // only ASCII digits remain, so byte truncation is on a char boundary
    digits.truncate(IMEI_LENGTH);
    digits
}

/// Returns true iff `candidate` is exactly 15 ASCII digits.
///
/// Does not assume the input went through [`sanitize`] first.
pub fn is_valid(candidate: &str) -> bool {
    IMEI_SHAPE.is_match(candidate)
}

/// Decides whether a keystroke may reach the field before it changes state.
///
/// `key` is a key name as reported by the input layer (`"5"`, `"a"`,
/// `"Backspace"`). Accepts single ASCII digits and [`CONTROL_KEYS`]; the
/// caller must suppress everything else.
pub fn filter_keystroke(key: &str) -> bool {
    is_digit_key(key) || CONTROL_KEYS.contains(&key)
}

/// Sanitizes clipboard text for a paste.
///
/// The caller must cancel the default paste and replace the whole field
/// value with the result. Pasted text never merges with existing digits.
pub fn handle_paste(clipboard: &str) -> String {
    sanitize(clipboard)
}

pub(crate) fn is_digit_key(key: &str) -> bool {
    key.len() == 1 && key.as_bytes()[0].is_ascii_digit()
}
