//! CLI for tubefetch.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tubefetch_core::config::{self, TubefetchConfig};

use commands::{run_fetch, run_serve, run_tools, run_validate};

/// Top-level CLI for tubefetch.
#[derive(Debug, Parser)]
#[command(name = "tubefetch")]
#[command(about = "tubefetch: YouTube download API backed by yt-dlp and ffmpeg", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/tubefetch/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run the HTTP API.
    Serve {
        /// Listen address, e.g. 0.0.0.0:8000. Overrides `bind_addr`.
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
        /// Download directory. Overrides `output_dir`.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Log to stderr instead of the state-dir log file.
        #[arg(long)]
        log_stderr: bool,
    },

    /// Download one URL through the same pipeline the API uses.
    Fetch {
        /// YouTube video, short, or playlist URL.
        url: String,
        /// video, audio or both.
        #[arg(long, default_value = "video")]
        mode: String,
        /// Download directory. Overrides `output_dir`.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Check a URL and print its canonical form.
    Validate {
        /// URL to check.
        url: String,
    },

    /// Show the yt-dlp and ffmpeg binaries that would be used.
    Tools,
}

impl Cli {
    pub fn wants_stderr_logging(&self) -> bool {
        matches!(self.command, CliCommand::Serve { log_stderr: true, .. })
    }

    pub async fn run(self) -> Result<()> {
        // Validation needs no config; don't create one as a side effect.
        if let CliCommand::Validate { url } = &self.command {
            return run_validate(url);
        }

        let cfg = load_config(self.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command {
            CliCommand::Serve {
                bind, output_dir, ..
            } => {
                let bind = bind.unwrap_or_else(|| cfg.bind_addr.clone());
                let output_dir = output_dir.unwrap_or_else(|| cfg.output_dir.clone());
                run_serve(&cfg, &bind, &output_dir).await?;
            }
            CliCommand::Fetch {
                url,
                mode,
                output_dir,
            } => {
                let output_dir = output_dir.unwrap_or_else(|| cfg.output_dir.clone());
                run_fetch(&cfg, &url, &mode, &output_dir).await?;
            }
            CliCommand::Validate { url } => run_validate(&url)?,
            CliCommand::Tools => run_tools(&cfg).await?,
        }

        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> Result<TubefetchConfig> {
    match path {
        Some(path) => config::load_from(path),
        None => config::load_or_init(),
    }
}
