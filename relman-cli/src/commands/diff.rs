//! `relman diff`: show unified diffs for what generate would write.

use anyhow::{Context, Result};
use clap::Args;

use relman_sync::pipeline;

use super::GlobalOpts;

/// Arguments for `relman diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {}

impl DiffArgs {
    pub fn run(self, global: &GlobalOpts) -> Result<()> {
        let config = global.load_config()?;
        let site = config
            .update_site()
            .context("`relman diff` needs an `update_site` section")?;
        let token = global.token(&config)?;

        let diffs = pipeline::diff(&config, &token).context("diff failed")?;
        if diffs.is_empty() {
            println!("No differences in {}.", site.output_dir.display());
            return Ok(());
        }

        for diff in diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }
        Ok(())
    }
}
