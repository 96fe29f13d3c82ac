// src/feeds/ashby.rs
use serde_json::Value;

use super::{first_text, records, text_at};
use crate::types::{FeedKind, JobPosting};

/// `jobs.ashbyhq.com/api/non-user-entities/job-board/{org}` response
pub fn adapt(org_slug: &str, payload: &Value) -> Vec<JobPosting> {
    let company = match text_at(payload, &["jobBoard", "companyName"]) {
        name if name.is_empty() => org_slug.to_string(),
        name => name,
    };

    records(FeedKind::Ashby, payload, Some("jobs"))
        .iter()
        .map(|job| {
            // location is an object on newer boards, a bare string on older ones
            let location = first_text(
                job,
                &[&["location", "name"], &["location", "locationText"], &["location"]],
            );

            JobPosting::new(
                FeedKind::Ashby,
                &company,
                &text_at(job, &["title"]),
                &location,
                &first_text(job, &[&["jobUrl"], &["applyUrl"]]),
            )
            .with_posted_at(&first_text(job, &[&["publishedDate"], &["createdAt"]]))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_company_name_from_board() {
        let payload = json!({
            "jobBoard": {"companyName": "Bright Machines"},
            "jobs": [
                {"title": "Controls Engineer", "location": {"name": "Durham, NC"}, "jobUrl": "https://a/1"},
                {"title": "PLC Engineer", "location": "Remote - US", "applyUrl": "https://a/2"}
            ]
        });
        let jobs = adapt("brightmachines", &payload);
        assert_eq!(jobs[0].company, "Bright Machines");
        assert_eq!(jobs[0].location, "Durham, NC");
        assert_eq!(jobs[1].location, "Remote - US");
        assert_eq!(jobs[1].url, "https://a/2");
    }

    #[test]
    fn test_company_falls_back_to_slug() {
        let jobs = adapt("acme", &json!({"jobs": [{"title": "Controls Lead"}]}));
        assert_eq!(jobs[0].company, "acme");
    }
}
