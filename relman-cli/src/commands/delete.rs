//! `relman delete-assets`: strip every asset from every release.

use anyhow::{Context, Result};
use clap::Args;

use relman_sync::{pipeline, DeleteOutcome};

use super::{dry_run_prefix, GlobalOpts};

/// Arguments for `relman delete-assets`.
#[derive(Args, Debug)]
pub struct DeleteAssetsArgs {
    /// List the assets that would be deleted without deleting them.
    #[arg(long)]
    pub dry_run: bool,
}

impl DeleteAssetsArgs {
    pub fn run(self, global: &GlobalOpts) -> Result<()> {
        let config = global.load_config()?;
        let releases = config
            .releases()
            .context("`relman delete-assets` needs a `releases` section")?;
        let token = global.token(&config)?;

        let report = pipeline::delete_release_assets(&config, &token, self.dry_run)
            .with_context(|| format!("asset deletion failed for {}", releases.slug()))?;

        for outcome in &report.assets {
            match outcome {
                DeleteOutcome::Deleted { tag, asset } => println!("  -  {tag}/{asset}"),
                DeleteOutcome::WouldDelete { tag, asset } => println!("  ~  {tag}/{asset}"),
            }
        }
        println!(
            "{}✓ {}: {} asset(s) removed from {} release(s)",
            dry_run_prefix(self.dry_run),
            releases.slug(),
            report.assets.len(),
            report.release_count,
        );
        Ok(())
    }
}
