//! `relman sync`: create missing releases and upload missing platform assets.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use relman_sync::{pipeline, AssetOutcome, ReleaseOutcome, SyncReport};

use super::{dry_run_prefix, GlobalOpts};

/// Arguments for `relman sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Report what would be created and uploaded without touching the repository.
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    pub fn run(self, global: &GlobalOpts) -> Result<()> {
        let config = global.load_config()?;
        let releases = config.releases().context("`relman sync` needs a `releases` section")?;
        let token = global.token(&config)?;

        let report = pipeline::sync_releases(&config, &token, self.dry_run)
            .with_context(|| format!("sync failed for {}", releases.slug()))?;
        print_report(&releases.slug(), &report, self.dry_run);
        Ok(())
    }
}

fn print_report(slug: &str, report: &SyncReport, dry_run: bool) {
    let prefix = dry_run_prefix(dry_run);
    if report.tags.is_empty() {
        println!("{prefix}✓ {slug}: no numeric tags found");
    }

    for outcome in &report.releases {
        match outcome {
            ReleaseOutcome::Created { tag } => println!("  +  release {tag}"),
            ReleaseOutcome::WouldCreate { tag } => println!("  ~  release {tag}"),
            ReleaseOutcome::Existing { .. } => {}
        }
    }

    for outcome in &report.assets {
        match outcome {
            AssetOutcome::Uploaded { tag, asset, .. } => println!("  +  {tag}/{asset}"),
            AssetOutcome::WouldUpload {
                tag,
                asset,
                source_url,
            } => println!("  ~  {tag}/{asset} ← {source_url}"),
            AssetOutcome::DownloadFailed {
                tag, asset, reason, ..
            } => println!("  {}  {tag}/{asset}: {reason}", "✗".red()),
            AssetOutcome::SkippedMalformedTag { tag, asset, reason } => {
                println!("  {}  {tag}/{asset}: {reason}", "!".yellow())
            }
            AssetOutcome::Present { .. } => {}
        }
    }

    println!(
        "{prefix}✓ {slug}: {} tag(s), {} release(s) created, {} asset(s) uploaded, {} skipped",
        report.tags.len(),
        report.created_count(),
        report.uploaded_count(),
        report.failed_count(),
    );
}
