// src/types/snapshot.rs
//! Captured feed payloads and search results, replayed instead of live API calls

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::job_posting::FeedKind;

/// One raw response body from a job board, tagged with where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedCapture {
    pub feed: FeedKind,
    /// Board token, slug, subdomain or Workday api_base, depending on the feed
    #[serde(default)]
    pub board: Option<String>,
    /// Display name to use instead of the board token
    #[serde(default)]
    pub company: Option<String>,
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub url: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCapture {
    pub query: String,
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

pub fn load_feed_captures(path: &Path) -> Result<Vec<FeedCapture>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))
}

pub fn load_search_captures(path: &Path) -> Result<Vec<SearchCapture>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read search results: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse search results: {}", path.display()))
}
