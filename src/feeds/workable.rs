// src/feeds/workable.rs
use serde_json::Value;

use super::{first_text, records, text_at};
use crate::types::{FeedKind, JobPosting};
use crate::utils::join_non_empty;

/// `jobs[]` of `{subdomain}.workable.com/api/v3/jobs?state=published`
pub fn adapt(subdomain: &str, payload: &Value) -> Vec<JobPosting> {
    records(FeedKind::Workable, payload, Some("jobs"))
        .iter()
        .map(|job| {
            let location = join_non_empty([
                text_at(job, &["location", "city"]).as_str(),
                text_at(job, &["location", "region"]).as_str(),
                text_at(job, &["location", "country"]).as_str(),
            ]);

            JobPosting::new(
                FeedKind::Workable,
                subdomain,
                &text_at(job, &["title"]),
                &location,
                &first_text(job, &[&["url"], &["application_url"]]),
            )
            .with_posted_at(&first_text(job, &[&["published_at"], &["created_at"]]))
        })
        .collect()
}
