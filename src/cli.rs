// src/cli.rs
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

use crate::classify::{
    is_staffing_agency, is_us_location, looks_manufacturing, looks_software_automation, title,
    JobFilter, RejectReason,
};
use crate::config::SweepConfig;
use crate::discovery::{HttpFetcher, StaticSearch, WebDiscovery};
use crate::output::{render_summary, write_company_view, write_postings, OutputFormat, ResultView};
use crate::pipeline::{
    paginate, sort_by_company, MissingDatePolicy, Pipeline, SnapshotSource, SweepSummary,
};
use crate::types::{FeedKind, JobPosting};

#[derive(Parser)]
#[command(name = "jobsweep")]
#[command(about = "Collect, classify and rank controls/automation engineering postings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run captured feeds and web discovery through the filters
    Run(RunArgs),
    /// Show how a single posting would be classified
    Classify(ClassifyArgs),
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// YAML or TOML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Captured feed payloads (JSON array of captures), repeatable
    #[arg(long = "snapshot")]
    pub snapshots: Vec<PathBuf>,

    /// Captured search results; enables web discovery
    #[arg(long)]
    pub search_results: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Print postings, or open roles per company
    #[arg(long, value_enum, default_value_t = ResultView::Postings)]
    pub view: ResultView,

    /// List postings by company and title instead of newest first
    #[arg(long)]
    pub by_company: bool,

    /// Write results here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// 1-based page; every result is printed when omitted
    #[arg(long)]
    pub page: Option<usize>,

    #[arg(long, default_value_t = 25)]
    pub per_page: usize,

    /// Keep postings outside the United States
    #[arg(long)]
    pub no_us_only: bool,

    /// Keep postings from staffing agencies
    #[arg(long)]
    pub keep_agencies: bool,

    /// Additional agency name to exclude, repeatable
    #[arg(long = "extra-agency")]
    pub extra_agencies: Vec<String>,

    /// Drop manager, lead and director titles
    #[arg(long)]
    pub exclude_leadership: bool,

    #[arg(long)]
    pub keep_technicians: bool,

    #[arg(long, value_enum)]
    pub missing_dates: Option<MissingDatePolicy>,
}

impl RunArgs {
    /// Flags win over the settings file
    pub fn apply_overrides(&self, config: &mut SweepConfig) {
        let filters = &mut config.filters;
        if self.no_us_only {
            filters.us_only = false;
        }
        if self.keep_agencies {
            filters.exclude_agencies = false;
        }
        if self.exclude_leadership {
            filters.include_leadership = false;
        }
        if self.keep_technicians {
            filters.exclude_technicians = false;
        }
        for agency in &self.extra_agencies {
            if !filters.extra_agencies.iter().any(|a| a.eq_ignore_ascii_case(agency)) {
                filters.extra_agencies.push(agency.clone());
            }
        }
        if let Some(policy) = self.missing_dates {
            config.sort.missing_dates = policy;
        }
    }
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long, default_value = "")]
    pub location: String,

    #[arg(long, default_value = "")]
    pub company: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ClassifyArgs {
    fn posting(&self) -> JobPosting {
        JobPosting::new(FeedKind::Web, &self.company, &self.title, &self.location, "")
            .with_description(&self.description)
    }
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run(args) => run(args).await,
        Command::Classify(args) => classify(args),
    }
}

async fn run(args: RunArgs) -> Result<()> {
    if args.snapshots.is_empty() && args.search_results.is_none() {
        bail!("Nothing to sweep: pass at least one --snapshot or --search-results file");
    }

    let mut config = SweepConfig::load_or_default(args.config.as_deref())?;
    args.apply_overrides(&mut config);

    let mut pipeline = Pipeline::new(config.filters.clone(), config.sort.clone());
    for path in &args.snapshots {
        pipeline = pipeline.with_source(Box::new(SnapshotSource::from_file(path)?));
    }

    if let Some(path) = &args.search_results {
        let search = StaticSearch::from_file(path)?;
        let queries = search.queries();
        let fetcher = HttpFetcher::new(&config.discovery.user_agent, config.discovery.timeout())?;
        let discovery = WebDiscovery::new(
            config.discovery.clone(),
            pipeline.filter().clone(),
            Box::new(fetcher),
            Box::new(search),
            queries,
        );
        pipeline = pipeline.with_source(Box::new(discovery));
    }

    let report = pipeline.run().await;
    for (reason, count) in &report.rejected {
        info!("Rejected {}: {}", reason, count);
    }
    info!("{}", render_summary(&SweepSummary::from_postings(&report.postings)).trim_end());

    let mut postings = report.postings;
    if args.by_company {
        sort_by_company(&mut postings);
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_results(&mut writer, &args, &postings)?;
            writer.flush().context("Failed to flush output file")?;
            info!("Wrote results to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            write_results(stdout.lock(), &args, &postings)?;
        }
    }

    Ok(())
}

/// Pages apply to the postings view; the company view always covers every result
fn write_results<W: Write>(writer: W, args: &RunArgs, postings: &[JobPosting]) -> Result<()> {
    match args.view {
        ResultView::Companies => write_company_view(writer, postings, args.format),
        ResultView::Postings => {
            let shown = match args.page {
                Some(page) => paginate(postings, page, args.per_page),
                None => postings,
            };
            write_postings(writer, shown, args.format)
        }
    }
}

/// Every classifier's answer for a hand-entered posting, then the overall verdict
pub fn verdict_lines(args: &ClassifyArgs, filter: &JobFilter) -> Vec<String> {
    let job = args.posting();
    let blob = job.blob();

    let checks = [
        ("title_is_target", title::title_is_target(&job.title)),
        ("title_is_engineering", title::title_is_engineering(&job.title)),
        ("title_is_leadership", title::title_is_leadership(&job.title)),
        ("title_is_technician", title::title_is_technician(&job.title)),
        ("looks_software_automation", looks_software_automation(&blob)),
        ("looks_manufacturing", looks_manufacturing(&blob)),
        ("is_us_location", is_us_location(&job.location, &job.location_area)),
        (
            "is_staffing_agency",
            is_staffing_agency(&job.company, &filter.options().extra_agencies),
        ),
    ];

    let mut lines: Vec<String> = checks
        .iter()
        .map(|(name, hit)| format!("{:<27}{}", name, if *hit { "yes" } else { "no" }))
        .collect();
    lines.push(match filter.rejection(&job) {
        None => format!("KEEP    {}", job.title),
        Some(reason) => format!("REJECT  {} ({})", job.title, reason),
    });
    lines
}

/// The first rejection for a hand-entered posting, or `None` if it would be kept
pub fn verdict(args: &ClassifyArgs, filter: &JobFilter) -> Option<RejectReason> {
    filter.rejection(&args.posting())
}

fn classify(args: ClassifyArgs) -> Result<()> {
    let config = SweepConfig::load_or_default(args.config.as_deref())?;
    let filter = JobFilter::new(config.filters);

    for line in verdict_lines(&args, &filter) {
        println!("{}", line);
    }
    Ok(())
}
