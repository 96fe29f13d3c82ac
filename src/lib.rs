// src/lib.rs
//! Controls and industrial-automation job sweep.
//!
//! Postings from several job boards (captured as JSON snapshots) and from a
//! robots.txt-aware JSON-LD crawler are normalized into [`JobPosting`]s,
//! filtered by the [`classify`] chain, deduplicated and ranked newest first.

pub mod classify;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod feeds;
pub mod output;
pub mod pipeline;
pub mod types;
pub mod utils;

use chrono::{DateTime, Utc};

pub use classify::{FilterOptions, JobFilter, RejectReason};
pub use config::SweepConfig;
pub use output::{OutputFormat, ResultView};
pub use pipeline::{CompanyCount, MissingDatePolicy, Pipeline, RunReport, SortOptions, SweepSummary};
pub use types::{FeedKind, JobPosting};

/// Filter, dedupe and sort postings that are already in memory
pub fn filter_postings(
    jobs: Vec<JobPosting>,
    filters: FilterOptions,
    sort: &SortOptions,
    now: DateTime<Utc>,
) -> Vec<JobPosting> {
    pipeline::refine(jobs, &JobFilter::new(filters), sort, now).postings
}
