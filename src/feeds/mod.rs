// src/feeds/mod.rs
//! Adapters turning each job board's raw JSON into [`JobPosting`]s.
//!
//! Adapters never fail: missing or oddly typed fields become empty strings,
//! and a payload with the wrong overall shape yields no postings.

pub mod adzuna;
pub mod ashby;
pub mod greenhouse;
pub mod lever;
pub mod smartrecruiters;
pub mod workable;
pub mod workday;

use serde_json::Value;
use tracing::{debug, warn};

use crate::discovery::jsonld;
use crate::types::{FeedCapture, FeedKind, JobPosting};
use crate::utils::normalize_text;

/// Convert one captured payload with the adapter matching its feed
pub fn adapt_capture(capture: &FeedCapture) -> Vec<JobPosting> {
    let board = capture.board.as_deref().unwrap_or_default();
    let mut postings = match capture.feed {
        FeedKind::Adzuna => adzuna::adapt(&capture.payload),
        FeedKind::Greenhouse => greenhouse::adapt(board, &capture.payload),
        FeedKind::Lever => lever::adapt(board, &capture.payload),
        FeedKind::SmartRecruiters => smartrecruiters::adapt(board, &capture.payload),
        FeedKind::Ashby => ashby::adapt(board, &capture.payload),
        FeedKind::Workable => workable::adapt(board, &capture.payload),
        FeedKind::Workday => workday::adapt(board, &capture.payload),
        FeedKind::Web => jsonld::postings_from_value(&capture.payload, board),
    };

    if let Some(company) = capture.company.as_deref().map(normalize_text) {
        if !company.is_empty() && capture.feed.uses_board_as_company() {
            // only postings whose company fell back to the board token
            let token = normalize_text(board);
            for posting in postings.iter_mut().filter(|p| p.company == token) {
                posting.company = company.clone();
            }
        }
    }

    debug!(
        "Adapted {} postings from {} board '{}'",
        postings.len(),
        capture.feed,
        board
    );
    postings
}

impl FeedKind {
    /// Feeds where the board token can stand in for a missing employer name
    fn uses_board_as_company(&self) -> bool {
        matches!(
            self,
            FeedKind::Greenhouse
                | FeedKind::Lever
                | FeedKind::SmartRecruiters
                | FeedKind::Ashby
                | FeedKind::Workable
                | FeedKind::Workday
        )
    }
}

// ===== Value helpers =====

/// Records array under `key`, or an empty slice with a warning if the shape is off
pub(crate) fn records<'a>(feed: FeedKind, payload: &'a Value, key: Option<&str>) -> &'a [Value] {
    let target = match key {
        Some(key) => payload.get(key),
        None => Some(payload),
    };
    match target.and_then(Value::as_array) {
        Some(items) => items.as_slice(),
        None => {
            warn!("Unexpected {} payload shape, no records found", feed);
            &[]
        }
    }
}

/// Text at a nested path; numbers and booleans are stringified, anything else is empty
pub(crate) fn text_at(value: &Value, path: &[&str]) -> String {
    let mut current = value;
    for key in path {
        match current.get(key) {
            Some(next) => current = next,
            None => return String::new(),
        }
    }
    match current {
        Value::String(s) => normalize_text(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// First non-empty text among several paths
pub(crate) fn first_text(value: &Value, paths: &[&[&str]]) -> String {
    paths
        .iter()
        .map(|path| text_at(value, path))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

pub(crate) fn text_list_at(value: &Value, path: &[&str]) -> Vec<String> {
    let mut current = value;
    for key in path {
        match current.get(key) {
            Some(next) => current = next,
            None => return Vec::new(),
        }
    }
    current
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(normalize_text)
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_at_handles_types() {
        let v = json!({"a": {"b": "  x  y "}, "n": 42, "o": {"k": 1}});
        assert_eq!(text_at(&v, &["a", "b"]), "x y");
        assert_eq!(text_at(&v, &["n"]), "42");
        assert_eq!(text_at(&v, &["o"]), "");
        assert_eq!(text_at(&v, &["missing", "b"]), "");
    }

    #[test]
    fn test_first_text_skips_empty() {
        let v = json!({"a": "", "b": "second"});
        assert_eq!(first_text(&v, &[&["a"], &["b"]]), "second");
    }

    #[test]
    fn test_records_wrong_shape_is_empty() {
        assert!(records(FeedKind::Greenhouse, &json!({"jobs": "nope"}), Some("jobs")).is_empty());
        assert_eq!(records(FeedKind::Lever, &json!([1, 2]), None).len(), 2);
    }

    #[test]
    fn test_company_override_applies_to_token_feeds() {
        let capture = FeedCapture {
            feed: FeedKind::Greenhouse,
            board: Some("acmemfg".to_string()),
            company: Some("Acme Manufacturing".to_string()),
            payload: json!({"jobs": [{"title": "Controls Engineer", "absolute_url": "https://x/1"}]}),
        };
        let postings = adapt_capture(&capture);
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].company, "Acme Manufacturing");
    }

    #[test]
    fn test_company_override_ignored_for_adzuna() {
        let capture = FeedCapture {
            feed: FeedKind::Adzuna,
            board: None,
            company: Some("Ignored".to_string()),
            payload: json!({"results": [{"title": "PLC Engineer", "company": {"display_name": "Real Co"}}]}),
        };
        assert_eq!(adapt_capture(&capture)[0].company, "Real Co");
    }

    #[test]
    fn test_company_override_keeps_payload_company() {
        let workday = FeedCapture {
            feed: FeedKind::Workday,
            board: Some("https://acme.wd5.myworkdayjobs.com/wday/cxs/acme/jobs".to_string()),
            company: Some("Acme Manufacturing".to_string()),
            payload: json!({"jobPostings": [
                {"title": "Controls Engineer", "company": "Acme Robotics", "externalPath": "/job/1"},
                {"title": "PLC Engineer", "externalPath": "/job/2"}
            ]}),
        };
        let companies: Vec<_> = adapt_capture(&workday).into_iter().map(|p| p.company).collect();
        assert_eq!(companies, vec!["Acme Robotics", "Acme Manufacturing"]);

        let ashby = |payload: serde_json::Value| FeedCapture {
            feed: FeedKind::Ashby,
            board: Some("widgets".to_string()),
            company: Some("Widget Works".to_string()),
            payload,
        };
        let named = ashby(json!({
            "jobBoard": {"companyName": "Widgets Inc"},
            "jobs": [{"title": "Automation Engineer"}]
        }));
        let unnamed = ashby(json!({"jobs": [{"title": "Controls Engineer"}]}));
        assert_eq!(adapt_capture(&named)[0].company, "Widgets Inc");
        assert_eq!(adapt_capture(&unnamed)[0].company, "Widget Works");
    }
}
