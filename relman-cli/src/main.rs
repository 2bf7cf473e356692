//! relman: plugin release synchronisation and update-site CLI.
//!
//! # Usage
//!
//! ```text
//! relman [-v] [--config PATH] [--token T] sync [--dry-run]
//! relman delete-assets [--dry-run]
//! relman generate [--dry-run] [--output-dir DIR]
//! relman diff
//! relman status [--json]
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    delete::DeleteAssetsArgs, diff::DiffArgs, generate::GenerateArgs, status::StatusArgs,
    sync::SyncArgs, GlobalOpts,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "relman",
    version,
    about = "Keep plugin releases, their assets and the update site in step",
    long_about = None,
)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (default: ~/.relman/config.yaml).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// API token; takes precedence over the configuration file.
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create releases for the newest tags and upload missing platform assets.
    Sync(SyncArgs),

    /// Delete every asset of every release. Releases are kept.
    DeleteAssets(DeleteAssetsArgs),

    /// Write the stable and nightly update-site descriptors.
    Generate(GenerateArgs),

    /// Show unified diff of what generate would write.
    Diff(DiffArgs),

    /// Show which platform-version assets each release carries.
    Status(StatusArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let global = GlobalOpts {
        config: cli.config,
        token: cli.token,
    };
    match cli.command {
        Commands::Sync(args) => args.run(&global),
        Commands::DeleteAssets(args) => args.run(&global),
        Commands::Generate(args) => args.run(&global),
        Commands::Diff(args) => args.run(&global),
        Commands::Status(args) => args.run(&global),
    }
}
