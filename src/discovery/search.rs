// src/discovery/search.rs
//! Where candidate career-page URLs come from

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

use crate::types::snapshot::load_search_captures;
use crate::types::{SearchCapture, SearchHit};

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchHit>>;
}

/// Replays captured web-search responses, keyed by query text
#[derive(Debug, Clone, Default)]
pub struct StaticSearch {
    captures: Vec<SearchCapture>,
}

impl StaticSearch {
    pub fn new(captures: Vec<SearchCapture>) -> Self {
        Self { captures }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::new(load_search_captures(path)?))
    }

    pub fn queries(&self) -> Vec<String> {
        self.captures.iter().map(|c| c.query.clone()).collect()
    }
}

#[async_trait]
impl SearchProvider for StaticSearch {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchHit>> {
        let hits = self
            .captures
            .iter()
            .find(|c| c.query == query)
            .map(|c| c.results.iter().take(count).cloned().collect())
            .unwrap_or_else(|| {
                debug!("No captured results for query: {}", query);
                Vec::new()
            });
        Ok(hits)
    }
}
