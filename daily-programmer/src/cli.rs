//! # daily-programmer CLI Interface (Module)
//!
//! Command parsing and the async [`run`] entrypoint. The binary only sets up
//! the environment and tracing before handing over to [`run`]; integration
//! tests call [`run`] directly with a constructed [`Cli`].
//!
//! Fetching the Slack channel history is outside this tool: both subcommands
//! read a JSON export written by whatever talks to Slack (the raw
//! `conversations.history` response, or a single message record).
//!
//! All rendering and publishing logic lives in `daily-programmer-core`.

use crate::load_config::{load_repo_url, DEFAULT_CONFIG_PATH};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use daily_programmer_core::config::{HelperConfig, DEFAULT_OUTPUT_DIR};
use daily_programmer_core::contract::{ChannelHistory, Message, WriteMode};
use daily_programmer_core::helper::DailyProgrammerHelper;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI for daily-programmer: render challenge announcements and publish them to gh-pages.
#[derive(Parser)]
#[clap(
    name = "daily-programmer",
    version,
    about = "Render Daily Programmer challenges posted on Slack to Markdown and publish them to gh-pages"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a whole channel history export and replace the published page with it
    History {
        /// JSON export of the channel history (`{"messages": [...]}`, newest first)
        #[clap(long)]
        history: PathBuf,
        #[clap(flatten)]
        target: TargetArgs,
        /// How the page is written: `a`/`append` or `w`/`overwrite`
        #[clap(long, default_value = "overwrite")]
        mode: String,
    },
    /// Render a single message export and add it to the published page
    Message {
        /// JSON export of one message (`{"text": "..."}`)
        #[clap(long)]
        message: PathBuf,
        #[clap(flatten)]
        target: TargetArgs,
        /// How the page is written: `a`/`append` or `w`/`overwrite`
        #[clap(long, default_value = "append")]
        mode: String,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct TargetArgs {
    /// Path to the YAML config file holding the GitRepoInfo section
    #[clap(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    /// Directory holding the published page, also used as git working tree
    #[clap(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

impl TargetArgs {
    fn helper_config(&self) -> HelperConfig {
        HelperConfig {
            output_dir: self.output_dir.clone(),
            ..HelperConfig::with_repo_url(load_repo_url(&self.config))
        }
    }
}

fn read_export(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read export {}", path.display()))
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::History {
            history,
            target,
            mode,
        } => {
            let mode: WriteMode = mode.parse()?;
            let history = ChannelHistory::from_json(&read_export(&history)?)
                .context("Failed to parse channel history export")?;
            let helper = DailyProgrammerHelper::from_config(&target.helper_config());
            match helper.parse_channel_history_with_mode(&history, mode).await {
                Ok(report) => {
                    tracing::info!(command = "history", ?report, "History processed");
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "history", error = %e, "History processing failed");
                    Err(anyhow::Error::new(e))
                }
            }
        }
        Commands::Message {
            message,
            target,
            mode,
        } => {
            let mode: WriteMode = mode.parse()?;
            let message = Message::from_json(&read_export(&message)?)
                .context("Failed to parse message export")?;
            let helper = DailyProgrammerHelper::from_config(&target.helper_config());
            match helper.parse_message_with_mode(&message, mode).await {
                Ok(report) => {
                    tracing::info!(command = "message", ?report, "Message processed");
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "message", error = %e, "Message processing failed");
                    Err(anyhow::Error::new(e))
                }
            }
        }
    }
}
