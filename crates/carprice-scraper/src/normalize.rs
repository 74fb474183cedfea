//! Conversions from raw listing text to typed field values.
//!
//! All functions are pure. Failures surface as [`ScraperError::Format`] and
//! are meant to reach the per-listing isolation boundary uncaught.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ScraperError;

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}").expect("valid year regex"));

static THOUSANDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+,[0-9]+)|([0-9]+\s[0-9]+)").expect("valid thousands regex")
});

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid digits regex"));

/// Returns the first run of four consecutive digits, e.g. `"1998"` from
/// `"Произведена 1998 г."`.
///
/// # Errors
///
/// Returns [`ScraperError::Format`] when no four-digit run is present.
pub fn parse_year(raw: &str) -> Result<String, ScraperError> {
    YEAR_RE
        .find(raw)
        .map(|m| m.as_str().to_owned())
        .ok_or_else(|| format_error(raw, "a 4-digit year"))
}

/// Parses a thousands-grouped number such as `"12,345"` or `"12 345"`.
///
/// Only the first group pair is matched, so `"1 234 567"` yields `1234`.
/// `separator` is stripped from the match before parsing; a match grouped
/// with a different mark than `separator` fails to parse.
///
/// # Errors
///
/// Returns [`ScraperError::Format`] when the text holds no grouped number,
/// including plain digit runs like `"12345"`.
pub fn parse_thousands(raw: &str, separator: &str) -> Result<u32, ScraperError> {
    let grouped = THOUSANDS_RE
        .find(raw)
        .ok_or_else(|| format_error(raw, "a thousands-grouped number"))?;
    parse_digits(grouped.as_str(), separator, raw)
}

/// Like [`parse_thousands`], but accepts an ungrouped digit run when no
/// grouping mark is present (`"500 км"` → `500`).
///
/// # Errors
///
/// Returns [`ScraperError::Format`] when the text contains no digits at all.
pub fn parse_thousands_lenient(raw: &str, separator: &str) -> Result<u32, ScraperError> {
    if let Some(grouped) = THOUSANDS_RE.find(raw) {
        return parse_digits(grouped.as_str(), separator, raw);
    }
    let digits = DIGITS_RE
        .find(raw)
        .ok_or_else(|| format_error(raw, "a number"))?;
    parse_digits(digits.as_str(), separator, raw)
}

/// Parses the first whitespace-delimited token as an integer.
///
/// Returns `0` rather than failing when the token is not purely numeric;
/// callers treat `0` as "unparseable" and drop the record later.
#[must_use]
pub fn parse_bounded_integer(raw: &str) -> u32 {
    raw.split_whitespace()
        .next()
        .and_then(|token| token.parse::<u32>().ok())
        .unwrap_or(0)
}

fn parse_digits(matched: &str, separator: &str, raw: &str) -> Result<u32, ScraperError> {
    matched
        .replace(separator, "")
        .parse::<u32>()
        .map_err(|_| format_error(raw, "a thousands-grouped number"))
}

fn format_error(raw: &str, expected: &'static str) -> ScraperError {
    ScraperError::Format {
        raw: raw.to_owned(),
        expected,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
