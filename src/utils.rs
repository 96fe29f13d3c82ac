// src/utils.rs
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

static RELATIVE_DAYS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^posted\s+(\d+)\+?\s+days?\s+ago$").expect("valid relative date regex")
});

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn normalize_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Join the non-empty parts with ", " after normalizing each one
pub fn join_non_empty<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(normalize_text)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Lowercased host of a URL, without port
pub fn host_of(url: &str) -> Option<String> {
    url::Url::parse(url.trim())
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
}

/// True when `host` is `domain` itself or one of its subdomains
pub fn host_matches_domain(host: &str, domain: &str) -> bool {
    let host = host.trim_end_matches('.').to_lowercase();
    let domain = domain.trim().trim_start_matches('.').to_lowercase();
    host == domain || host.ends_with(&format!(".{}", domain))
}

/// Interpret the date strings the different feeds hand back.
///
/// Relative Workday phrases ("Posted 3 Days Ago") are resolved against `now`.
pub fn parse_posted_at(raw: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if s.chars().all(|c| c.is_ascii_digit()) {
        let n: i64 = s.parse().ok()?;
        // Lever hands out epoch milliseconds
        return if s.len() >= 12 {
            DateTime::from_timestamp_millis(n)
        } else {
            DateTime::from_timestamp(n, 0)
        };
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc());
        }
    }

    for format in ["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, format) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    parse_relative_posted(s, now)
}

fn parse_relative_posted(s: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let lower = normalize_text(s).to_lowercase();
    match lower.as_str() {
        "posted today" | "today" => return Some(now),
        "posted yesterday" | "yesterday" => return days_before(now, 1),
        _ => {}
    }

    let caps = RELATIVE_DAYS_RE.captures(&lower)?;
    let days: i64 = caps[1].parse().ok()?;
    days_before(now, days)
}

/// Out-of-range day counts are treated as unparseable
fn days_before(now: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    now.checked_sub_signed(Duration::try_days(days)?)
}
