//! CLI for hlsfetch.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use hlsfetch_core::config;
use std::path::PathBuf;

use commands::{run_download, run_resolve, run_status, RunOptions};

/// Top-level CLI for hlsfetch.
#[derive(Debug, Parser)]
#[command(name = "hlsfetch")]
#[command(about = "hlsfetch: download the segments of an HLS playlist and join them with ffmpeg", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Where the segment list comes from.
#[derive(Debug, Clone, Args)]
pub struct PlaylistArgs {
    /// Base URL segment references are resolved against (should end with '/').
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: String,

    /// Index (playlist) file listing the segments.
    #[arg(long, default_value = "index.m3u8", value_name = "FILE")]
    pub index: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every segment, write the concat list and run ffmpeg.
    Run {
        #[command(flatten)]
        playlist: PlaylistArgs,

        /// Directory holding the downloaded segments.
        #[arg(long = "temp-folder", default_value = ".", value_name = "DIR")]
        temp_folder: PathBuf,

        /// Final output file written by ffmpeg.
        #[arg(long, value_name = "FILE")]
        out: PathBuf,

        /// Query parameters appended to every segment URL (e.g. "token=abc").
        #[arg(long = "args", default_value = "", value_name = "QUERY", allow_hyphen_values = true)]
        extra_args: String,

        /// Resume: skip segments whose file already exists and is non-empty.
        #[arg(long)]
        retry: bool,

        /// Segments fetched concurrently (default from config, 8).
        #[arg(long, value_name = "N")]
        concurrency: Option<usize>,

        /// Give up on a segment after N attempts (0 = never give up).
        #[arg(long = "max-attempts", value_name = "N")]
        max_attempts: Option<u32>,

        /// Let ffmpeg replace an existing output file.
        #[arg(long)]
        overwrite: bool,
    },

    /// Print the resolved segment URLs without downloading anything.
    Resolve {
        #[command(flatten)]
        playlist: PlaylistArgs,

        /// Query parameters appended to every segment URL.
        #[arg(long = "args", default_value = "", value_name = "QUERY", allow_hyphen_values = true)]
        extra_args: String,
    },

    /// Show which segment files are already present in the temp folder.
    Status {
        #[command(flatten)]
        playlist: PlaylistArgs,

        /// Directory holding the downloaded segments.
        #[arg(long = "temp-folder", default_value = ".", value_name = "DIR")]
        temp_folder: PathBuf,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                playlist,
                temp_folder,
                out,
                extra_args,
                retry,
                concurrency,
                max_attempts,
                overwrite,
            } => {
                let opts = RunOptions {
                    base_url: playlist.base_url,
                    index: playlist.index,
                    temp_folder,
                    out,
                    extra_args,
                    resume: retry,
                    concurrency,
                    max_attempts,
                    overwrite,
                };
                run_download(&cfg, opts).await?;
            }
            CliCommand::Resolve {
                playlist,
                extra_args,
            } => run_resolve(&playlist.base_url, &playlist.index, &extra_args).await?,
            CliCommand::Status {
                playlist,
                temp_folder,
            } => run_status(&cfg, &playlist.base_url, &playlist.index, &temp_folder).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
