// src/pipeline.rs
//! sources -> classifier chain -> dedupe -> sort

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::Path;
use tracing::{info, warn};

use crate::classify::{FilterOptions, JobFilter, RejectReason};
use crate::discovery::WebDiscovery;
use crate::feeds::adapt_capture;
use crate::types::snapshot::load_feed_captures;
use crate::types::{FeedCapture, FeedKind, JobPosting};

// ===== Sources =====

/// Anything that contributes postings to a run
#[async_trait]
pub trait JobSource: Send + Sync {
    fn name(&self) -> String;

    async fn collect(&self) -> Result<Vec<JobPosting>>;
}

/// Captured feed payloads run through their adapters
pub struct SnapshotSource {
    name: String,
    captures: Vec<FeedCapture>,
}

impl SnapshotSource {
    pub fn new(name: &str, captures: Vec<FeedCapture>) -> Self {
        Self {
            name: name.to_string(),
            captures,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let captures = load_feed_captures(path)?;
        Ok(Self::new(&path.display().to_string(), captures))
    }
}

#[async_trait]
impl JobSource for SnapshotSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn collect(&self) -> Result<Vec<JobPosting>> {
        Ok(self.captures.iter().flat_map(adapt_capture).collect())
    }
}

#[async_trait]
impl JobSource for WebDiscovery {
    fn name(&self) -> String {
        "web discovery".to_string()
    }

    async fn collect(&self) -> Result<Vec<JobPosting>> {
        Ok(self.discover().await)
    }
}

// ===== Ordering =====

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MissingDatePolicy {
    /// Undated postings count as posted at run time and float to the top
    #[default]
    Now,
    /// Undated postings sink below everything dated
    Oldest,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOptions {
    pub missing_dates: MissingDatePolicy,
}

/// Newest first. Stable, so equal dates keep their input order.
pub fn sort_by_posted(jobs: &mut [JobPosting], policy: MissingDatePolicy, now: DateTime<Utc>) {
    jobs.sort_by_cached_key(|job| {
        let date = job.posted_date(now);
        Reverse(match policy {
            MissingDatePolicy::Now => Some(date.unwrap_or(now)),
            MissingDatePolicy::Oldest => date,
        })
    });
}

/// Exact (company, title, location, url) dedupe, first occurrence wins
pub fn dedupe(jobs: Vec<JobPosting>) -> Vec<JobPosting> {
    let mut seen = HashSet::new();
    jobs.into_iter()
        .filter(|job| seen.insert(job.dedupe_key()))
        .collect()
}

/// 1-based page of at most `per_page` postings; out-of-range pages are empty
pub fn paginate(jobs: &[JobPosting], page: usize, per_page: usize) -> &[JobPosting] {
    if page == 0 || per_page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(per_page);
    if start >= jobs.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(jobs.len());
    &jobs[start..end]
}

/// Alphabetical by company, then title, ignoring case
pub fn sort_by_company(jobs: &mut [JobPosting]) {
    jobs.sort_by_cached_key(|job| (job.company.to_lowercase(), job.title.to_lowercase()));
}

// ===== Company view =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyCount {
    pub company: String,
    pub open_roles: usize,
}

/// Open roles per company, most roles first, ties by name
pub fn company_counts(jobs: &[JobPosting]) -> Vec<CompanyCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for job in jobs {
        *counts.entry(job.company.as_str()).or_default() += 1;
    }

    let mut rows: Vec<CompanyCount> = counts
        .into_iter()
        .map(|(company, open_roles)| CompanyCount {
            company: company.to_string(),
            open_roles,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.open_roles
            .cmp(&a.open_roles)
            .then_with(|| a.company.cmp(&b.company))
    });
    rows
}

/// Headline figures for a result set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepSummary {
    pub postings: usize,
    pub hiring_companies: usize,
    pub unique_locations: usize,
    pub feeds: BTreeMap<FeedKind, usize>,
}

impl SweepSummary {
    pub fn from_postings(jobs: &[JobPosting]) -> Self {
        let companies: BTreeSet<&str> = jobs.iter().map(|j| j.company.as_str()).collect();
        let locations: BTreeSet<&str> = jobs
            .iter()
            .map(|j| j.location.as_str())
            .filter(|l| !l.is_empty())
            .collect();

        let mut feeds = BTreeMap::new();
        for job in jobs {
            *feeds.entry(job.feed).or_insert(0) += 1;
        }

        Self {
            postings: jobs.len(),
            hiring_companies: companies.len(),
            unique_locations: locations.len(),
            feeds,
        }
    }
}

pub fn apply_filters(
    jobs: Vec<JobPosting>,
    filter: &JobFilter,
) -> (Vec<JobPosting>, BTreeMap<RejectReason, usize>) {
    let mut rejected = BTreeMap::new();
    let kept = jobs
        .into_iter()
        .filter(|job| match filter.rejection(job) {
            Some(reason) => {
                *rejected.entry(reason).or_insert(0) += 1;
                false
            }
            None => true,
        })
        .collect();
    (kept, rejected)
}

/// Filter, dedupe and sort an already collected set of postings
pub fn refine(
    jobs: Vec<JobPosting>,
    filter: &JobFilter,
    sort: &SortOptions,
    now: DateTime<Utc>,
) -> RunReport {
    let (kept, rejected) = apply_filters(jobs, filter);
    let before = kept.len();
    let mut postings = dedupe(kept);
    let duplicates = before - postings.len();
    sort_by_posted(&mut postings, sort.missing_dates, now);

    RunReport {
        postings,
        rejected,
        duplicates,
        ..RunReport::default()
    }
}

// ===== Run =====

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub postings: Vec<JobPosting>,
    /// Raw postings each source contributed, in source order
    pub collected: Vec<(String, usize)>,
    pub failed_sources: Vec<String>,
    pub rejected: BTreeMap<RejectReason, usize>,
    pub duplicates: usize,
}

impl RunReport {
    pub fn total_collected(&self) -> usize {
        self.collected.iter().map(|(_, n)| n).sum()
    }

    pub fn total_rejected(&self) -> usize {
        self.rejected.values().sum()
    }
}

pub struct Pipeline {
    filter: JobFilter,
    sort: SortOptions,
    sources: Vec<Box<dyn JobSource>>,
}

impl Pipeline {
    pub fn new(filters: FilterOptions, sort: SortOptions) -> Self {
        Self {
            filter: JobFilter::new(filters),
            sort,
            sources: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: Box<dyn JobSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn filter(&self) -> &JobFilter {
        &self.filter
    }

    pub async fn run(&self) -> RunReport {
        self.run_at(Utc::now()).await
    }

    /// `now` stands in for every missing or relative posting date in this run
    pub async fn run_at(&self, now: DateTime<Utc>) -> RunReport {
        let mut all = Vec::new();
        let mut collected = Vec::new();
        let mut failed_sources = Vec::new();

        for source in &self.sources {
            let name = source.name();
            match source.collect().await {
                Ok(jobs) => {
                    info!("{}: {} raw postings", name, jobs.len());
                    collected.push((name, jobs.len()));
                    all.extend(jobs);
                }
                Err(e) => {
                    warn!("Source {} failed, skipping: {:#}", name, e);
                    collected.push((name.clone(), 0));
                    failed_sources.push(name);
                }
            }
        }

        let report = RunReport {
            collected,
            failed_sources,
            ..refine(all, &self.filter, &self.sort, now)
        };

        info!(
            "Kept {} of {} postings ({} rejected, {} duplicates)",
            report.postings.len(),
            report.total_collected(),
            report.total_rejected(),
            report.duplicates
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeedKind;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap()
    }

    fn job(title: &str, posted_at: &str) -> JobPosting {
        JobPosting::new(FeedKind::Greenhouse, "acme", title, "Ohio", &format!("https://x/{}", title))
            .with_posted_at(posted_at)
    }

    fn titles(jobs: &[JobPosting]) -> Vec<&str> {
        jobs.iter().map(|j| j.title.as_str()).collect()
    }

    #[test]
    fn test_dedupe_keeps_first_and_is_idempotent() {
        let a = job("A", "2025-01-01");
        let mut a_later = job("A", "2025-02-01");
        a_later.description = "different description".to_string();
        let b = job("B", "");

        let once = dedupe(vec![a.clone(), b.clone(), a_later]);
        assert_eq!(once, vec![a, b]);
        assert_eq!(dedupe(once.clone()), once);
    }

    #[test]
    fn test_sort_missing_dates_now() {
        let mut jobs = vec![
            job("old", "2025-01-01"),
            job("undated", ""),
            job("new", "2025-06-01"),
            job("garbled", "next week"),
        ];
        sort_by_posted(&mut jobs, MissingDatePolicy::Now, now());
        assert_eq!(titles(&jobs), vec!["undated", "garbled", "new", "old"]);
    }

    #[test]
    fn test_sort_missing_dates_oldest() {
        let mut jobs = vec![job("undated", ""), job("old", "2025-01-01"), job("new", "2025-06-01")];
        sort_by_posted(&mut jobs, MissingDatePolicy::Oldest, now());
        assert_eq!(titles(&jobs), vec!["new", "old", "undated"]);
    }

    #[test]
    fn test_sort_is_non_increasing() {
        let mut jobs = vec![
            job("a", "2025-03-01"),
            job("b", "Posted 2 Days Ago"),
            job("c", "1735689600000"),
            job("d", "2025-05-20T10:00:00Z"),
        ];
        sort_by_posted(&mut jobs, MissingDatePolicy::Now, now());
        let dates: Vec<_> = jobs.iter().map(|j| j.posted_date(now()).unwrap()).collect();
        assert!(dates.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_sort_by_company() {
        let mut jobs = vec![
            JobPosting::new(FeedKind::Lever, "widget works", "PLC Engineer", "Ohio", "https://x/1"),
            JobPosting::new(FeedKind::Lever, "Acme", "Controls Engineer", "Ohio", "https://x/2"),
            JobPosting::new(FeedKind::Lever, "Widget Works", "Automation Engineer", "Ohio", "https://x/3"),
        ];
        sort_by_company(&mut jobs);
        assert_eq!(titles(&jobs), vec!["Controls Engineer", "Automation Engineer", "PLC Engineer"]);
    }

    #[test]
    fn test_company_counts_and_summary() {
        let jobs = vec![
            JobPosting::new(FeedKind::Lever, "Widget Works", "PLC Engineer", "Columbus, OH", "https://x/1"),
            JobPosting::new(FeedKind::Greenhouse, "Acme", "Controls Engineer", "Dallas, TX", "https://x/2"),
            JobPosting::new(FeedKind::Lever, "Widget Works", "Automation Engineer", "Columbus, OH", "https://x/3"),
            JobPosting::new(FeedKind::Web, "Beta Corp", "Controls Engineer", "", "https://x/4"),
        ];

        let counts = company_counts(&jobs);
        let rows: Vec<_> = counts.iter().map(|c| (c.company.as_str(), c.open_roles)).collect();
        assert_eq!(rows, vec![("Widget Works", 2), ("Acme", 1), ("Beta Corp", 1)]);

        let summary = SweepSummary::from_postings(&jobs);
        assert_eq!(summary.postings, 4);
        assert_eq!(summary.hiring_companies, 3);
        assert_eq!(summary.unique_locations, 2);
        assert_eq!(summary.feeds.get(&FeedKind::Lever), Some(&2));
        assert_eq!(summary.feeds.get(&FeedKind::Adzuna), None);
        assert!(company_counts(&[]).is_empty());
    }

    #[test]
    fn test_pipeline_filter_carries_options() {
        let options = FilterOptions {
            us_only: false,
            extra_agencies: vec!["Acme Staffing".to_string()],
            ..FilterOptions::default()
        };
        let pipeline = Pipeline::new(options, SortOptions::default());
        assert!(!pipeline.filter().options().us_only);
        assert_eq!(pipeline.filter().options().extra_agencies, vec!["Acme Staffing".to_string()]);
    }

    #[test]
    fn test_paginate() {
        let jobs: Vec<_> = (0..5).map(|i| job(&i.to_string(), "")).collect();
        assert_eq!(titles(paginate(&jobs, 1, 2)), vec!["0", "1"]);
        assert_eq!(titles(paginate(&jobs, 3, 2)), vec!["4"]);
        assert!(paginate(&jobs, 4, 2).is_empty());
        assert!(paginate(&jobs, 0, 2).is_empty());
    }

    struct FailingSource;

    #[async_trait]
    impl JobSource for FailingSource {
        fn name(&self) -> String {
            "broken".to_string()
        }

        async fn collect(&self) -> Result<Vec<JobPosting>> {
            anyhow::bail!("HTTP 429 Too Many Requests")
        }
    }

    #[tokio::test]
    async fn test_run_survives_failing_source() {
        let captures = vec![FeedCapture {
            feed: FeedKind::Greenhouse,
            board: Some("acme".to_string()),
            company: Some("Acme Mfg".to_string()),
            payload: json!({"jobs": [
                {"title": "Controls Engineer", "location": {"name": "Dallas, TX"},
                 "absolute_url": "https://boards.greenhouse.io/acme/jobs/1"},
                {"title": "Controls Engineer", "location": {"name": "Dallas, TX"},
                 "absolute_url": "https://boards.greenhouse.io/acme/jobs/1"},
                {"title": "QA Automation Engineer", "location": {"name": "Dallas, TX"},
                 "absolute_url": "https://boards.greenhouse.io/acme/jobs/2"}
            ]}),
        }];

        let options = FilterOptions {
            require_manufacturing_context: false,
            ..FilterOptions::default()
        };
        let report = Pipeline::new(options, SortOptions::default())
            .with_source(Box::new(FailingSource))
            .with_source(Box::new(SnapshotSource::new("snapshot", captures)))
            .run_at(now())
            .await;

        assert_eq!(report.failed_sources, vec!["broken".to_string()]);
        assert_eq!(report.total_collected(), 3);
        assert_eq!(report.postings.len(), 1);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.rejected.get(&RejectReason::SoftwareAutomation), Some(&1));
    }

    #[tokio::test]
    async fn test_run_with_out_of_range_relative_date() {
        let captures = vec![FeedCapture {
            feed: FeedKind::Workday,
            board: Some("https://acme.wd5.myworkdayjobs.com/wday/cxs/acme/jobs".to_string()),
            company: None,
            payload: json!({"jobPostings": [
                {"title": "Controls Engineer", "locationsText": "Dallas, TX",
                 "externalPath": "/job/1", "postedOn": "Posted 100000000 Days Ago"},
                {"title": "PLC Engineer", "locationsText": "Austin, TX",
                 "externalPath": "/job/2", "postedOn": "Posted 2 Days Ago"}
            ]}),
        }];
        let options = FilterOptions {
            require_manufacturing_context: false,
            ..FilterOptions::default()
        };
        let sort = SortOptions {
            missing_dates: MissingDatePolicy::Oldest,
        };
        let report = Pipeline::new(options, sort)
            .with_source(Box::new(SnapshotSource::new("workday", captures)))
            .run_at(now())
            .await;

        assert_eq!(titles(&report.postings), vec!["PLC Engineer", "Controls Engineer"]);
    }
}
