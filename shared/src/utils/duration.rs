//! Human-friendly duration parsing for TTL settings
//!
//! Accepts either a bare number of seconds (`"900"`) or a number followed by a
//! unit suffix: `s`, `m`, `h` or `d` (`"15m"`, `"7d"`).

use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

static DURATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\s*([smhd]?)\s*$").unwrap()
});

/// Parse a duration string such as `"900"`, `"15m"` or `"7d"`
///
/// Returns `None` for anything that does not match, including overflow.
pub fn parse_duration(value: &str) -> Option<Duration> {
    let captures = DURATION_REGEX.captures(value)?;
    let amount: u64 = captures.get(1)?.as_str().parse().ok()?;

    let multiplier = match captures.get(2).map(|m| m.as_str()).unwrap_or("") {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => return None,
    };

    amount.checked_mul(multiplier).map(Duration::from_secs)
}
