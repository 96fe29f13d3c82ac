// src/feeds/greenhouse.rs
use serde_json::Value;

use super::{first_text, records, text_at};
use crate::types::{FeedKind, JobPosting};

/// `jobs[]` of `boards-api.greenhouse.io/v1/boards/{token}/jobs`
pub fn adapt(token: &str, payload: &Value) -> Vec<JobPosting> {
    records(FeedKind::Greenhouse, payload, Some("jobs"))
        .iter()
        .map(|job| {
            JobPosting::new(
                FeedKind::Greenhouse,
                token,
                &text_at(job, &["title"]),
                &text_at(job, &["location", "name"]),
                &text_at(job, &["absolute_url"]),
            )
            .with_posted_at(&first_text(job, &[&["updated_at"], &["created_at"]]))
        })
        .collect()
}
