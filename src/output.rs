// src/output.rs
//! Result sinks for postings and the per-company roll-up: text table, CSV and JSON

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::pipeline::{company_counts, CompanyCount, SweepSummary};
use crate::types::JobPosting;

const TABLE_COLUMNS: [&str; 6] = ["company", "title", "location", "posted_at", "url", "feed"];
const COMPANY_COLUMNS: [&str; 2] = ["company", "open_roles"];
const MAX_CELL_WIDTH: usize = 48;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

/// What `run` prints: the postings themselves or the per-company roll-up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResultView {
    #[default]
    Postings,
    Companies,
}

/// Displayed columns only; description and area hints stay internal
#[derive(Debug, Serialize)]
struct DisplayRow<'a> {
    company: &'a str,
    title: &'a str,
    location: &'a str,
    posted_at: &'a str,
    url: &'a str,
    feed: &'static str,
}

impl<'a> From<&'a JobPosting> for DisplayRow<'a> {
    fn from(job: &'a JobPosting) -> Self {
        Self {
            company: &job.company,
            title: &job.title,
            location: &job.location,
            posted_at: &job.posted_at,
            url: &job.url,
            feed: job.feed.as_str(),
        }
    }
}

pub fn write_postings<W: Write>(writer: W, postings: &[JobPosting], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(writer, postings),
        OutputFormat::Csv => write_csv(writer, postings),
        OutputFormat::Json => write_json(writer, postings),
    }
}

pub fn write_csv<W: Write>(writer: W, postings: &[JobPosting]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if postings.is_empty() {
        csv_writer
            .write_record(TABLE_COLUMNS)
            .context("Failed to write CSV header")?;
    }
    for job in postings {
        csv_writer
            .serialize(DisplayRow::from(job))
            .context("Failed to write CSV row")?;
    }
    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

pub fn write_json<W: Write>(mut writer: W, postings: &[JobPosting]) -> Result<()> {
    let rows: Vec<DisplayRow> = postings.iter().map(DisplayRow::from).collect();
    serde_json::to_writer_pretty(&mut writer, &rows).context("Failed to write JSON output")?;
    writeln!(writer).context("Failed to write JSON output")?;
    Ok(())
}

pub fn write_table<W: Write>(mut writer: W, postings: &[JobPosting]) -> Result<()> {
    writer
        .write_all(render_table(postings).as_bytes())
        .context("Failed to write table")?;
    Ok(())
}

/// Fixed-width table; long cells are cut at a column limit, URLs never are
pub fn render_table(postings: &[JobPosting]) -> String {
    let rows: Vec<Vec<String>> = postings
        .iter()
        .map(|job| {
            vec![
                clip(&job.company),
                clip(&job.title),
                clip(&job.location),
                clip(&job.posted_at),
                job.url.clone(),
                job.feed.to_string(),
            ]
        })
        .collect();
    render_grid(&TABLE_COLUMNS, &rows)
}

fn render_grid(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(rule.join("  ").trim_end());
    out.push('\n');
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

// ===== Company view =====

/// Open roles per company with the headline figures on top
pub fn write_company_view<W: Write>(
    mut writer: W,
    postings: &[JobPosting],
    format: OutputFormat,
) -> Result<()> {
    let counts = company_counts(postings);
    let summary = SweepSummary::from_postings(postings);

    match format {
        OutputFormat::Table => {
            let rendered = format!("{}\n{}", render_summary(&summary), render_company_table(&counts));
            writer
                .write_all(rendered.as_bytes())
                .context("Failed to write company table")?;
        }
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            if counts.is_empty() {
                csv_writer
                    .write_record(COMPANY_COLUMNS)
                    .context("Failed to write CSV header")?;
            }
            for row in &counts {
                csv_writer.serialize(row).context("Failed to write CSV row")?;
            }
            csv_writer.flush().context("Failed to flush CSV output")?;
        }
        OutputFormat::Json => {
            let view = CompanyView {
                summary: &summary,
                companies: &counts,
            };
            serde_json::to_writer_pretty(&mut writer, &view).context("Failed to write JSON output")?;
            writeln!(writer).context("Failed to write JSON output")?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct CompanyView<'a> {
    summary: &'a SweepSummary,
    companies: &'a [CompanyCount],
}

pub fn render_summary(summary: &SweepSummary) -> String {
    let feeds = summary
        .feeds
        .iter()
        .map(|(feed, n)| format!("{} {}", feed, n))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Open roles: {}  Hiring companies: {}  Unique locations: {}\nFeeds: {}\n",
        summary.postings,
        summary.hiring_companies,
        summary.unique_locations,
        if feeds.is_empty() { "none".to_string() } else { feeds }
    )
}

fn render_company_table(counts: &[CompanyCount]) -> String {
    let rows: Vec<Vec<String>> = counts
        .iter()
        .map(|c| vec![clip(&c.company), c.open_roles.to_string()])
        .collect();
    render_grid(&COMPANY_COLUMNS, &rows)
}

fn clip(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        return cell.to_string();
    }
    let mut clipped: String = cell.chars().take(MAX_CELL_WIDTH - 1).collect();
    clipped.push('…');
    clipped
}
