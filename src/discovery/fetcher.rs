// src/discovery/fetcher.rs
//! HTTP GET seam used by the crawler for robots.txt and career pages

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Non-2xx responses are returned as pages, only transport failures are errors.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to GET {}", url))?;

        let status = response.status().as_u16();
        debug!("GET {} -> {}", url, status);

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read body of {}", url))?;

        Ok(FetchedPage { status, body })
    }
}
