// src/classify/geography.rs
//! Permissive "is this in the US" test over free-text locations

use regex::Regex;
use std::sync::LazyLock;

use crate::utils::normalize_text;

pub const US_STATE_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC",
];

pub const US_STATE_NAMES: &[&str] = &[
    "alabama", "alaska", "arizona", "arkansas", "california", "colorado", "connecticut",
    "delaware", "florida", "georgia", "hawaii", "idaho", "illinois", "indiana", "iowa",
    "kansas", "kentucky", "louisiana", "maine", "maryland", "massachusetts", "michigan",
    "minnesota", "mississippi", "missouri", "montana", "nebraska", "nevada", "new hampshire",
    "new jersey", "new mexico", "new york", "north carolina", "north dakota", "ohio",
    "oklahoma", "oregon", "pennsylvania", "rhode island", "south carolina", "south dakota",
    "tennessee", "texas", "utah", "vermont", "virginia", "washington", "west virginia",
    "wisconsin", "wyoming", "district of columbia",
];

// Codes are matched on the original casing so "in", "or" and "me" in prose stay quiet.
static STATE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b({})\b", US_STATE_CODES.join("|"))).expect("valid state code regex")
});

static COUNTRY_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bUS\b|\bU\.S\.").expect("valid country code regex"));

/// True when the display location or any area hint names the US, a state or a state code.
pub fn is_us_location(display: &str, area: &[String]) -> bool {
    let mut combined = normalize_text(display);
    if !area.is_empty() {
        combined.push(' ');
        combined.push_str(&area.join(" "));
    }
    let lower = combined.to_lowercase();

    if lower.contains("united states") || lower.contains("usa") {
        return true;
    }
    if COUNTRY_CODE_RE.is_match(&combined) {
        return true;
    }
    if US_STATE_NAMES.iter().any(|state| lower.contains(state)) {
        return true;
    }
    STATE_CODE_RE.is_match(&combined)
}
