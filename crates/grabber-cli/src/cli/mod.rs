//! CLI for grabber.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use grabber_core::config;
use std::path::PathBuf;

use commands::{run_dl, run_export};

/// Top-level CLI for grabber.
#[derive(Debug, Parser)]
#[command(name = "grabber")]
#[command(about = "Find downloadable file links on a page and fetch them concurrently", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Where links come from. Exactly one must be given.
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Page URL to parse for downloadable files.
    #[arg(long, value_name = "URL")]
    pub from_url: Option<String>,

    /// For `dl`: an exported link file (`#` lines name subdirectories).
    /// For `export`: a list of page URLs to scan, one per line.
    #[arg(long, value_name = "FILE")]
    pub from_file: Option<PathBuf>,

    /// Local HTML file to parse; only absolute links are used.
    #[arg(long, value_name = "FILE")]
    pub from_html: Option<PathBuf>,
}

/// The selected source flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Url(String),
    File(PathBuf),
    Html(PathBuf),
}

impl SourceArgs {
    pub fn origin(&self) -> Result<Origin> {
        match (&self.from_url, &self.from_file, &self.from_html) {
            (Some(url), None, None) => Ok(Origin::Url(url.clone())),
            (None, Some(path), None) => Ok(Origin::File(path.clone())),
            (None, None, Some(path)) => Ok(Origin::Html(path.clone())),
            (None, None, None) => {
                anyhow::bail!("one of --from-url, --from-file, or --from-html must be specified")
            }
            _ => anyhow::bail!(
                "cannot specify multiple sources; use only one of --from-url, --from-file, or --from-html"
            ),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download files from a page, an exported link file, or an HTML file.
    Dl {
        /// Number of concurrent download workers (default from config, 4).
        #[arg(long, value_name = "N")]
        workers: Option<usize>,

        /// Save the fetched page HTML for inspection (debug.html by default).
        #[arg(short = 'd', long)]
        debug: bool,

        #[command(flatten)]
        source: SourceArgs,

        /// Output directory for downloads.
        #[arg(short = 'o', long = "output", value_name = "OUTPUT_DIR")]
        output: PathBuf,
    },

    /// Export downloadable URLs to a text file, one per line.
    Export {
        /// Save the fetched page HTML for inspection (debug.html by default).
        #[arg(short = 'd', long)]
        debug: bool,

        #[command(flatten)]
        source: SourceArgs,

        /// Output file for the URL list.
        #[arg(short = 'o', long = "output", value_name = "OUTPUT_FILE")]
        output: PathBuf,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Dl {
                workers,
                debug,
                source,
                output,
            } => {
                let workers = workers.unwrap_or(cfg.workers);
                run_dl(&cfg, source.origin()?, &output, workers, debug).await?;
            }
            CliCommand::Export {
                debug,
                source,
                output,
            } => run_export(&cfg, source.origin()?, &output, debug).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
