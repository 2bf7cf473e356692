//! `relman status`: platform-version asset coverage per release.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use relman_core::types::PlatformVersion;
use relman_sync::{pipeline, ReleaseCoverage};

use super::GlobalOpts;

/// Arguments for `relman status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self, global: &GlobalOpts) -> Result<()> {
        let config = global.load_config()?;
        let releases = config
            .releases()
            .context("`relman status` needs a `releases` section")?;
        let token = global.token(&config)?;

        let coverage = pipeline::release_status(&config, &token)
            .with_context(|| format!("status failed for {}", releases.slug()))?;
        if self.json {
            return print_json(&releases.slug(), coverage);
        }
        print_table(&releases.slug(), coverage);
        Ok(())
    }
}

#[derive(Serialize)]
struct StatusReportJson {
    repository: String,
    releases: Vec<ReleaseStatusJson>,
}

#[derive(Serialize)]
struct ReleaseStatusJson {
    tag: String,
    published_at: Option<String>,
    complete: bool,
    present: Vec<String>,
    missing: Vec<String>,
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "release")]
    release: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "present")]
    present: String,
    #[tabled(rename = "missing")]
    missing: String,
    #[tabled(rename = "published")]
    published: String,
}

fn join(versions: &[PlatformVersion]) -> String {
    if versions.is_empty() {
        return "-".to_string();
    }
    versions
        .iter()
        .map(PlatformVersion::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_json(slug: &str, coverage: Vec<ReleaseCoverage>) -> Result<()> {
    let payload = StatusReportJson {
        repository: slug.to_string(),
        releases: coverage
            .into_iter()
            .map(|c| ReleaseStatusJson {
                tag: c.tag.0,
                published_at: c.published_at.map(|t| t.to_rfc3339()),
                complete: c.missing.is_empty(),
                present: c.present.into_iter().map(|v| v.0).collect(),
                missing: c.missing.into_iter().map(|v| v.0).collect(),
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
    );
    Ok(())
}

fn print_table(slug: &str, coverage: Vec<ReleaseCoverage>) {
    let incomplete = coverage.iter().filter(|c| !c.missing.is_empty()).count();
    println!(
        "relman v{} | {slug} | {} releases | {incomplete} incomplete",
        env!("CARGO_PKG_VERSION"),
        coverage.len(),
    );
    if coverage.is_empty() {
        println!("No releases found.");
        return;
    }

    let rows: Vec<StatusTableRow> = coverage
        .iter()
        .map(|c| StatusTableRow {
            release: c.tag.to_string(),
            status: if c.missing.is_empty() {
                "COMPLETE".green().to_string()
            } else {
                "INCOMPLETE".yellow().to_string()
            },
            present: join(&c.present),
            missing: join(&c.missing),
            published: c
                .published_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    if incomplete > 0 {
        println!("Run 'relman sync' to upload missing assets.");
    }
}
