// src/feeds/smartrecruiters.rs
use serde_json::Value;

use super::{first_text, records, text_at};
use crate::types::{FeedKind, JobPosting};
use crate::utils::join_non_empty;

/// `content[]` of `api.smartrecruiters.com/v1/companies/{slug}/postings`
pub fn adapt(slug: &str, payload: &Value) -> Vec<JobPosting> {
    records(FeedKind::SmartRecruiters, payload, Some("content"))
        .iter()
        .map(|posting| {
            let location = join_non_empty([
                text_at(posting, &["location", "city"]).as_str(),
                text_at(posting, &["location", "region"]).as_str(),
                text_at(posting, &["location", "countryCode"]).as_str(),
            ]);
            let url = first_text(
                posting,
                &[&["applyUrl"], &["ref", "applyUrl"], &["ref", "self"]],
            );

            JobPosting::new(
                FeedKind::SmartRecruiters,
                slug,
                &text_at(posting, &["name"]),
                &location,
                &url,
            )
            .with_posted_at(&first_text(posting, &[&["releasedDate"], &["createdOn"]]))
        })
        .collect()
}
