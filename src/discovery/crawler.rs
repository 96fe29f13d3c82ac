// src/discovery/crawler.rs
//! Search results -> employer career pages -> classified JSON-LD postings

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::fetcher::PageFetcher;
use super::jsonld::extract_job_postings;
use super::robots::RobotsCache;
use super::search::SearchProvider;
use crate::classify::JobFilter;
use crate::types::{JobPosting, SearchHit};
use crate::utils::{host_matches_domain, host_of};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (BD Controls BD Dashboard)";

static CAREER_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/careers?|/jobs?|/join|/opportunit|/vacanc").expect("valid career path regex")
});

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryOptions {
    /// Candidate pages kept per search query
    pub per_query: usize,
    /// Productive pages visited per host
    pub per_domain_cap: usize,
    pub blocked_domains: Vec<String>,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub pause_ms: u64,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            per_query: 8,
            per_domain_cap: 3,
            blocked_domains: [
                "linkedin.com",
                "indeed.com",
                "glassdoor.com",
                "ziprecruiter.com",
                "monster.com",
                "simplyhired.com",
                "talent.com",
                "snagajob.com",
                "careerbuilder.com",
            ]
            .iter()
            .map(|d| d.to_string())
            .collect(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 20,
            pause_ms: 200,
        }
    }
}

impl DiscoveryOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Search hits that look like employer career pages, capped at `per_query`
pub fn candidate_urls(hits: &[SearchHit], options: &DiscoveryOptions) -> Vec<String> {
    hits.iter()
        .map(|hit| hit.url.trim())
        .filter(|url| !url.is_empty())
        .filter(|url| match host_of(url) {
            Some(host) => !options
                .blocked_domains
                .iter()
                .any(|domain| host_matches_domain(&host, domain)),
            None => false,
        })
        .filter(|url| CAREER_PATH_RE.is_match(url))
        .take(options.per_query)
        .map(str::to_string)
        .collect()
}

pub struct WebDiscovery {
    options: DiscoveryOptions,
    filter: JobFilter,
    fetcher: Box<dyn PageFetcher>,
    search: Box<dyn SearchProvider>,
    queries: Vec<String>,
}

impl WebDiscovery {
    pub fn new(
        options: DiscoveryOptions,
        filter: JobFilter,
        fetcher: Box<dyn PageFetcher>,
        search: Box<dyn SearchProvider>,
        queries: Vec<String>,
    ) -> Self {
        Self {
            options,
            filter,
            fetcher,
            search,
            queries,
        }
    }

    /// One cold crawl: fresh robots cache and per-host counters every call
    pub async fn discover(&self) -> Vec<JobPosting> {
        let mut robots = RobotsCache::new(&self.options.user_agent, &self.options.blocked_domains);
        let mut productive_pages: HashMap<String, usize> = HashMap::new();
        let mut jobs = Vec::new();

        for query in &self.queries {
            let hits = match self.search.search(query, self.options.per_query * 2).await {
                Ok(hits) => hits,
                Err(e) => {
                    warn!("Search failed for '{}': {}", query, e);
                    continue;
                }
            };

            for url in candidate_urls(&hits, &self.options) {
                let Some(host) = host_of(&url) else {
                    continue;
                };
                if productive_pages.get(&host).copied().unwrap_or(0) >= self.options.per_domain_cap {
                    debug!("Per-domain cap reached for {}, skipping {}", host, url);
                    continue;
                }

                let postings = self.crawl_page(&mut robots, &url).await;
                if !postings.is_empty() {
                    *productive_pages.entry(host).or_default() += 1;
                    jobs.extend(postings);
                }

                if self.options.pause_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(self.options.pause_ms)).await;
                }
            }
        }

        info!(
            "Web discovery found {} postings across {} hosts",
            jobs.len(),
            productive_pages.len()
        );
        jobs
    }

    async fn crawl_page(&self, robots: &mut RobotsCache, url: &str) -> Vec<JobPosting> {
        if !robots.can_fetch(self.fetcher.as_ref(), url).await {
            debug!("robots.txt or blocklist disallows {}", url);
            return Vec::new();
        }

        let page = match self.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                return Vec::new();
            }
        };
        if !page.is_ok() {
            debug!("Skipping {} (HTTP {})", url, page.status);
            return Vec::new();
        }

        extract_job_postings(&page.body, url)
            .into_iter()
            .filter(|job| {
                self.filter
                    .content_rejection(&job.title, &job.blob())
                    .or_else(|| self.filter.location_rejection(&job.location, &job.location_area))
                    .is_none()
            })
            .collect()
    }
}
