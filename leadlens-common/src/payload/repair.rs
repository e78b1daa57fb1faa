//! Normalization of malformed serialized evaluation payloads
//!
//! The upstream evaluator emits one known family of malformations:
//! stray CR/LF characters inside the blob, and bare time-of-day values
//! (`"tiempo_promedio": 02:15:30` instead of a quoted string). This is
//! not a general JSON repairer; it targets exactly those cases.

use once_cell::sync::Lazy;
use regex::Regex;

/// Bare `H:M:S` token in value position: preceded by a colon, followed
/// by a comma, closing brace/bracket, or end of input. Already-quoted
/// times do not match (the value position holds a quote, not a digit),
/// which keeps the repair idempotent.
static BARE_TIME_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(:\s*)(\d{1,2}:\d{1,2}:\d{1,2})\s*([,}\]]|$)"#).expect("static regex")
});

/// Repair a raw evaluation payload into parseable JSON text.
///
/// Total function: never fails, identity on empty input. Boolean/null
/// literals and bare integer values are already valid and pass through
/// untouched.
pub fn repair(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    // Strip CR/LF first so the time pattern can match across what used
    // to be line breaks.
    let stripped: String = raw.chars().filter(|c| *c != '\r' && *c != '\n').collect();

    BARE_TIME_VALUE
        .replace_all(&stripped, "${1}\"${2}\"${3}")
        .into_owned()
}
