pub mod delete;
pub mod diff;
pub mod generate;
pub mod status;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};

use relman_core::config::{self, Config};

/// Options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalOpts {
    pub config: Option<PathBuf>,
    pub token: Option<String>,
}

impl GlobalOpts {
    /// Load the configuration from `--config` or `~/.relman/config.yaml`.
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => config::load_at(path)
                .with_context(|| format!("failed to load config from {}", path.display())),
            None => config::load().context("failed to load config; create ~/.relman/config.yaml"),
        }
    }

    /// Token from `--token` / `GITHUB_TOKEN`, else from the configuration.
    pub fn token(&self, config: &Config) -> Result<String> {
        config
            .resolve_token(self.token.as_deref())
            .context("failed to resolve API token")
    }
}

pub(crate) fn dry_run_prefix(dry_run: bool) -> &'static str {
    if dry_run {
        "[dry-run] "
    } else {
        ""
    }
}
