// src/discovery/mod.rs
//! Best-effort web discovery of employer job postings.
//!
//! Candidate pages come from a [`SearchProvider`], are checked against the
//! domain blocklist and robots.txt, and every JSON-LD `JobPosting` found on
//! them goes through the same classifiers as the feed records.

pub mod crawler;
pub mod fetcher;
pub mod jsonld;
pub mod robots;
pub mod search;

#[cfg(test)]
pub(crate) mod testing;

pub use crawler::{candidate_urls, DiscoveryOptions, WebDiscovery, DEFAULT_USER_AGENT};
pub use fetcher::{FetchedPage, HttpFetcher, PageFetcher};
pub use robots::RobotsCache;
pub use search::{SearchProvider, StaticSearch};
