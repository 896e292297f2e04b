//! CLI for imgfetch.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use imgfetch_core::config;
use std::path::PathBuf;

use commands::{run_checksum, run_completions, run_fetch, FetchArgs};

/// Top-level CLI for imgfetch.
#[derive(Debug, Parser)]
#[command(name = "imgfetch")]
#[command(about = "imgfetch: mindfully collect images from the web", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch images from URLs into the collection folder.
    Fetch {
        /// Image URLs. Each argument may hold several comma-separated URLs.
        /// With none given, one comma-separated line is read from stdin.
        urls: Vec<String>,

        /// Collection directory (default from config, "Fetched_Images").
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Fetch up to N URLs at once (default from config, 1 = sequential).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,

        /// Print the summary as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Print the SHA-256 fingerprint of a local file (as used for dedup).
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },

    /// Generate shell completions on stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Fetch {
                urls,
                dir,
                jobs,
                json,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_fetch(
                    &cfg,
                    FetchArgs {
                        urls,
                        dir,
                        jobs,
                        json,
                    },
                )
                .await?
            }
            CliCommand::Checksum { path } => run_checksum(&path).await?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
