//! Targeted field extraction from evaluation payloads
//!
//! Pattern search instead of a full parse, so extraction still works on
//! payloads the repair step cannot fully fix. Records whose score does
//! not match are filtered out of aggregates downstream; that is a
//! legitimate case, not an error.

use once_cell::sync::Lazy;
use regex::Regex;

/// Explicit null for the score key, spaced or unspaced colon. Takes
/// priority over any numeric match elsewhere in the text.
static SCORE_NULL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""final_score"\s*:\s*null"#).expect("static regex"));

static SCORE_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""final_score"\s*:\s*(-?\d+)"#).expect("static regex"));

/// Quoted `H:M:S` duration with 1-2 digit components.
static DURATION_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""tiempo_promedio"\s*:\s*"(\d{1,2}:\d{1,2}:\d{1,2})""#).expect("static regex")
});

/// Scored fields pulled out of one evaluation payload. Derived per
/// record on every read, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    /// First integer score found, if any. May be negative; use
    /// [`ExtractedFields::usable_score`] for aggregation.
    pub final_score: Option<i64>,
    /// Average response duration in seconds; `None` when absent,
    /// malformed, or exactly zero ("no duration available").
    pub average_duration_secs: Option<i64>,
}

impl ExtractedFields {
    /// Score usable for aggregation: present and non-negative.
    pub fn usable_score(&self) -> Option<i64> {
        self.final_score.filter(|s| *s >= 0)
    }
}

/// Extract the scored fields from a raw payload.
///
/// Total and side-effect-free: any text that fails to match simply
/// yields absent fields.
pub fn extract(raw: &str) -> ExtractedFields {
    let final_score = if SCORE_NULL.is_match(raw) {
        None
    } else {
        SCORE_VALUE
            .captures(raw)
            .and_then(|c| c[1].parse::<i64>().ok())
    };

    let average_duration_secs = DURATION_VALUE
        .captures(raw)
        .map(|c| parse_duration_secs(&c[1]))
        .filter(|secs| *secs > 0);

    ExtractedFields {
        final_score,
        average_duration_secs,
    }
}

/// Parse `"H:M:S"` into total seconds. Anything that is not exactly
/// three numeric colon-separated components counts as zero, which the
/// caller treats as "no duration".
pub fn parse_duration_secs(text: &str) -> i64 {
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() != 3 {
        return 0;
    }
    let mut total = 0_i64;
    for (multiplier, part) in [3600, 60, 1].into_iter().zip(parts) {
        match part.trim().parse::<i64>() {
            Ok(value) => total += multiplier * value,
            Err(_) => return 0,
        }
    }
    total
}
