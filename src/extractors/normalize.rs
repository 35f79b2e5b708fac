// src/extractors/normalize.rs
//! Field normalizers. Every function here is total: bad input degrades to a
//! default instead of failing.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Failed to compile ISO_DATE_RE"));

/// Trims, folds embedded newlines into spaces and maps `""`/`"None"` to `None`.
pub fn normalize_text(value: Option<&str>) -> Option<String> {
    let cleaned = value?.trim().replace('\n', " ");
    if cleaned.is_empty() || cleaned == "None" {
        return None;
    }
    Some(cleaned)
}

/// Parses a strict `YYYY-MM-DD` date into midnight of that day.
///
/// A newline may stand in for either hyphen, as happens when a table cell wraps.
pub fn normalize_date(text: &str) -> Option<NaiveDateTime> {
    let candidate = text.trim().replace('\n', "-");
    if !ISO_DATE_RE.is_match(&candidate) {
        return None;
    }
    NaiveDate::parse_from_str(&candidate, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Parses a float, treating `E-8` magnitudes as the statement's zero sentinel.
pub fn normalize_float(text: &str) -> f64 {
    let candidate = text.trim().replace('\n', "");
    if candidate.is_empty() {
        return 0.0;
    }
    if candidate.contains("E-8") || candidate.contains("e-8") {
        return 0.0;
    }
    match candidate.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parses a non-negative integer; anything else is 0.
pub fn normalize_int(text: &str) -> u64 {
    text.trim().replace('\n', "").parse::<u64>().unwrap_or(0)
}
