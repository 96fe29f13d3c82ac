// src/types/job_posting.rs
//! Normalized job posting shared by every feed adapter and the crawler

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::{normalize_text, parse_posted_at};

// ===== Feed identity =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    Adzuna,
    Greenhouse,
    Lever,
    SmartRecruiters,
    Ashby,
    Workable,
    Workday,
    Web,
}

impl FeedKind {
    pub const ALL: [FeedKind; 8] = [
        FeedKind::Adzuna,
        FeedKind::Greenhouse,
        FeedKind::Lever,
        FeedKind::SmartRecruiters,
        FeedKind::Ashby,
        FeedKind::Workable,
        FeedKind::Workday,
        FeedKind::Web,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedKind::Adzuna => "adzuna",
            FeedKind::Greenhouse => "greenhouse",
            FeedKind::Lever => "lever",
            FeedKind::SmartRecruiters => "smartrecruiters",
            FeedKind::Ashby => "ashby",
            FeedKind::Workable => "workable",
            FeedKind::Workday => "workday",
            FeedKind::Web => "web",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        FeedKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| anyhow::anyhow!("Unknown feed: {}", s))
    }
}

// ===== Posting =====

/// One job listing, whatever connector produced it.
///
/// `posted_at` keeps the feed's own date string; use [`JobPosting::posted_date`]
/// to interpret it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub feed: FeedKind,
    pub company: String,
    pub title: String,
    pub location: String,
    #[serde(default)]
    pub location_area: Vec<String>,
    #[serde(default)]
    pub posted_at: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
}

impl JobPosting {
    pub fn new(feed: FeedKind, company: &str, title: &str, location: &str, url: &str) -> Self {
        Self {
            feed,
            company: normalize_text(company),
            title: normalize_text(title),
            location: normalize_text(location),
            location_area: Vec::new(),
            posted_at: String::new(),
            url: url.trim().to_string(),
            description: String::new(),
        }
    }

    pub fn with_posted_at(mut self, posted_at: &str) -> Self {
        self.posted_at = normalize_text(posted_at);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = normalize_text(description);
        self
    }

    pub fn with_location_area(mut self, area: Vec<String>) -> Self {
        self.location_area = area
            .iter()
            .map(|a| normalize_text(a))
            .filter(|a| !a.is_empty())
            .collect();
        self
    }

    /// Title and description joined, the text the content classifiers look at
    pub fn blob(&self) -> String {
        format!("{} {}", self.title, self.description)
    }

    pub fn dedupe_key(&self) -> (String, String, String, String) {
        (
            self.company.trim().to_string(),
            self.title.trim().to_string(),
            self.location.trim().to_string(),
            self.url.trim().to_string(),
        )
    }

    pub fn posted_date(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        parse_posted_at(&self.posted_at, now)
    }
}
