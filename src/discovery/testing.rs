// src/discovery/testing.rs
//! In-memory fetcher for crawler tests

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::fetcher::{FetchedPage, PageFetcher};

/// Serves canned pages; any other URL fails like a refused connection
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, FetchedPage>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn with_page(mut self, url: &str, status: u16, body: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            FetchedPage {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("connection refused: {}", url))
    }
}
