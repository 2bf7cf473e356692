//! `relman generate`: write `stable.xml` and `nightly.xml`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use relman_sync::{pipeline, GenerateReport, WriteResult};

use super::{dry_run_prefix, GlobalOpts};

/// Arguments for `relman generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Write the descriptors here instead of the configured `output_dir`.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

impl GenerateArgs {
    pub fn run(self, global: &GlobalOpts) -> Result<()> {
        let mut config = global.load_config()?;
        if let Some(dir) = self.output_dir {
            config
                .update_site
                .as_mut()
                .context("`relman generate` needs an `update_site` section")?
                .output_dir = dir;
        }
        config
            .update_site()
            .context("`relman generate` needs an `update_site` section")?;
        let token = global.token(&config)?;

        let report = pipeline::generate(&config, &token, self.dry_run)
            .context("update-site generation failed")?;
        print_report(&report, self.dry_run);
        Ok(())
    }
}

fn print_report(report: &GenerateReport, dry_run: bool) {
    let prefix = dry_run_prefix(dry_run);
    let written = report
        .writes
        .iter()
        .filter(|r| matches!(r, WriteResult::Written { .. } | WriteResult::WouldWrite { .. }))
        .count();

    println!(
        "{prefix}✓ update site: {} stable / {} nightly entries ({written} written, {} unchanged)",
        report.entries.stable.len(),
        report.entries.nightly.len(),
        report.writes.len() - written,
    );
    for r in &report.writes {
        match r {
            WriteResult::Written { path } => println!("  ✎  {}", path.display()),
            WriteResult::WouldWrite { path } => println!("  ~  {}", path.display()),
            WriteResult::Unchanged { path } => println!("  ·  {}", path.display()),
        }
    }
    if report.fallbacks > 0 {
        println!(
            "{}",
            format!(
                "warning: {} platform version(s) had no matching asset; their download URL lists every asset",
                report.fallbacks
            )
            .yellow()
        );
    }
}
