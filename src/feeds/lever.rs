// src/feeds/lever.rs
use chrono::DateTime;
use serde_json::Value;

use super::{first_text, records, text_at};
use crate::types::{FeedKind, JobPosting};

/// Top-level array of `api.lever.co/v0/postings/{token}?mode=json`
pub fn adapt(token: &str, payload: &Value) -> Vec<JobPosting> {
    records(FeedKind::Lever, payload, None)
        .iter()
        .map(|job| {
            JobPosting::new(
                FeedKind::Lever,
                token,
                &text_at(job, &["text"]),
                &text_at(job, &["categories", "location"]),
                &first_text(job, &[&["hostedUrl"], &["applyUrl"], &["url"]]),
            )
            .with_posted_at(&posted_at(job))
            .with_description(&text_at(job, &["descriptionPlain"]))
        })
        .collect()
}

// createdAt/updatedAt are epoch milliseconds
fn posted_at(job: &Value) -> String {
    ["createdAt", "updatedAt"]
        .iter()
        .filter_map(|key| job.get(key))
        .find_map(|v| match v {
            Value::Number(n) => n
                .as_i64()
                .and_then(DateTime::from_timestamp_millis)
                .map(|dt| dt.to_rfc3339()),
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        })
        .unwrap_or_default()
}
