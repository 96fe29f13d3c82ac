// src/feeds/workday.rs
use serde_json::Value;
use std::collections::BTreeSet;

use super::{first_text, records, text_at};
use crate::types::{FeedKind, JobPosting};

/// `jobPostings[]` from a Workday CXS `/jobs` search.
///
/// `api_base` looks like `https://wd5.myworkdayjobs.com/wday/cxs/acme/Careers`;
/// relative `externalPath`s are resolved against the part before `/wday/`.
pub fn adapt(api_base: &str, payload: &Value) -> Vec<JobPosting> {
    let root = api_base
        .split("/wday/")
        .next()
        .unwrap_or(api_base)
        .trim_end_matches('/');

    records(FeedKind::Workday, payload, Some("jobPostings"))
        .iter()
        .map(|job| {
            let company = match text_at(job, &["company"]) {
                name if name.is_empty() => api_base.to_string(),
                name => name,
            };

            let mut url = first_text(job, &[&["externalPath"], &["externalUrl"]]);
            if url.is_empty() {
                url = api_base.to_string();
            } else if url.starts_with('/') {
                url = format!("{}{}", root, url);
            }

            JobPosting::new(
                FeedKind::Workday,
                &company,
                &text_at(job, &["title"]),
                &location(job),
                &url,
            )
            .with_posted_at(&first_text(job, &[&["postedOn"], &["postedDate"]]))
        })
        .collect()
}

fn location(job: &Value) -> String {
    let names: BTreeSet<String> = job
        .get("locations")
        .and_then(Value::as_array)
        .map(|locs| {
            locs.iter()
                .map(|l| text_at(l, &["displayName"]))
                .filter(|n| !n.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if names.is_empty() {
        text_at(job, &["locationsText"])
    } else {
        names.into_iter().collect::<Vec<_>>().join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const API_BASE: &str = "https://wd5.myworkdayjobs.com/wday/cxs/rockwellautomation/RA_Careers";

    #[test]
    fn test_relative_path_is_resolved() {
        let payload = json!({"jobPostings": [{
            "title": "Controls Engineer",
            "locationsText": "Milwaukee, WI",
            "postedOn": "Posted 3 Days Ago",
            "externalPath": "/job/Milwaukee/Controls-Engineer_R1"
        }]});
        let jobs = adapt(API_BASE, &payload);
        assert_eq!(jobs[0].url, "https://wd5.myworkdayjobs.com/job/Milwaukee/Controls-Engineer_R1");
        assert_eq!(jobs[0].company, API_BASE);
        assert_eq!(jobs[0].location, "Milwaukee, WI");
        assert_eq!(jobs[0].posted_at, "Posted 3 Days Ago");
    }

    #[test]
    fn test_locations_are_unique_and_sorted() {
        let payload = json!({"jobPostings": [{
            "title": "Automation Lead",
            "company": "Rockwell Automation",
            "locations": [{"displayName": "Mayfield Heights, OH"}, {"displayName": "Austin, TX"}, {"displayName": "Austin, TX"}]
        }]});
        let jobs = adapt(API_BASE, &payload);
        assert_eq!(jobs[0].location, "Austin, TX, Mayfield Heights, OH");
        assert_eq!(jobs[0].company, "Rockwell Automation");
        assert_eq!(jobs[0].url, API_BASE);
    }
}
