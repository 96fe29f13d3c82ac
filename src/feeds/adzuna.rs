// src/feeds/adzuna.rs
use serde_json::Value;

use super::{records, text_at, text_list_at};
use crate::types::{FeedKind, JobPosting};

/// `results[]` of an Adzuna search page. The only feed with area hints and descriptions.
pub fn adapt(payload: &Value) -> Vec<JobPosting> {
    records(FeedKind::Adzuna, payload, Some("results"))
        .iter()
        .map(|job| {
            JobPosting::new(
                FeedKind::Adzuna,
                &text_at(job, &["company", "display_name"]),
                &text_at(job, &["title"]),
                &text_at(job, &["location", "display_name"]),
                &text_at(job, &["redirect_url"]),
            )
            .with_location_area(text_list_at(job, &["location", "area"]))
            .with_posted_at(&text_at(job, &["created"]))
            .with_description(&text_at(job, &["description"]))
        })
        .collect()
}
