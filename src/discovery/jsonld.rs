// src/discovery/jsonld.rs
//! schema.org `JobPosting` extraction from `application/ld+json` blocks

use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

use crate::feeds::{first_text, text_at};
use crate::types::{FeedKind, JobPosting};
use crate::utils::{host_of, join_non_empty, normalize_text};

static LD_JSON_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid ld+json selector")
});

/// Every JobPosting object found in the page, unfiltered
pub fn extract_job_postings(html: &str, page_url: &str) -> Vec<JobPosting> {
    let document = Html::parse_document(html);

    document
        .select(&LD_JSON_SELECTOR)
        .filter_map(|script| {
            let raw = script.text().collect::<String>();
            match serde_json::from_str::<Value>(raw.trim()) {
                Ok(value) => Some(value),
                Err(e) => {
                    debug!("Skipping malformed JSON-LD block on {}: {}", page_url, e);
                    None
                }
            }
        })
        .flat_map(|value| postings_from_value(&value, page_url))
        .collect()
}

/// JobPostings inside one parsed JSON-LD value (object, array or `@graph`)
pub fn postings_from_value(value: &Value, page_url: &str) -> Vec<JobPosting> {
    let mut objects = Vec::new();
    collect_objects(value, &mut objects);

    objects
        .into_iter()
        .filter(|obj| is_job_posting(obj))
        .filter_map(|obj| posting_from_object(obj, page_url))
        .collect()
}

fn collect_objects<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| collect_objects(item, out)),
        Value::Object(map) => {
            out.push(value);
            if let Some(graph) = map.get("@graph") {
                collect_objects(graph, out);
            }
        }
        _ => {}
    }
}

fn is_job_posting(obj: &Value) -> bool {
    let type_value = obj.get("@type").or_else(|| obj.get("type"));
    match type_value {
        Some(Value::String(t)) => t.eq_ignore_ascii_case("jobposting"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case("jobposting")),
        _ => false,
    }
}

fn posting_from_object(obj: &Value, page_url: &str) -> Option<JobPosting> {
    let title = text_at(obj, &["title"]);
    if title.is_empty() {
        return None;
    }

    let company = match first_text(obj, &[&["hiringOrganization", "name"], &["hiringOrganization"]]) {
        name if name.is_empty() => host_of(page_url).unwrap_or_default(),
        name => name,
    };

    let url = match text_at(obj, &["url"]) {
        url if url.starts_with("http") => url,
        _ => page_url.to_string(),
    };

    let description = strip_html(&text_at(obj, &["description"]));

    Some(
        JobPosting::new(FeedKind::Web, &company, &title, &location(obj), &url)
            .with_posted_at(&text_at(obj, &["datePosted"]))
            .with_description(&description),
    )
}

fn location(obj: &Value) -> String {
    let job_location = match obj.get("jobLocation") {
        Some(Value::Array(locations)) => locations.first(),
        other => other,
    };

    let display = job_location
        .and_then(|loc| loc.get("address"))
        .map(|address| {
            join_non_empty([
                text_at(address, &["addressLocality"]).as_str(),
                text_at(address, &["addressRegion"]).as_str(),
                first_text(address, &[&["addressCountry", "name"], &["addressCountry"]]).as_str(),
            ])
        })
        .unwrap_or_default();

    if !display.is_empty() {
        return display;
    }

    if text_at(obj, &["jobLocationType"]).eq_ignore_ascii_case("telecommute") {
        let requirement = match obj.get("applicantLocationRequirements") {
            Some(Value::Array(reqs)) => reqs.first().map(|r| text_at(r, &["name"])),
            Some(req) => Some(text_at(req, &["name"])),
            None => None,
        }
        .unwrap_or_default();
        return join_non_empty(["Remote", requirement.as_str()]);
    }

    String::new()
}

/// JSON-LD descriptions are usually HTML fragments
fn strip_html(fragment: &str) -> String {
    if !fragment.contains('<') {
        return fragment.to_string();
    }
    let parsed = Html::parse_fragment(fragment);
    normalize_text(&parsed.root_element().text().collect::<Vec<_>>().join(" "))
}
