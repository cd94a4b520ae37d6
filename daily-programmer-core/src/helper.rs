//! Top-level pipeline: transform → aggregate → write → publish.
//!
//! [`DailyProgrammerHelper`] is built explicitly around a [`ChallengeWriter`]
//! and runs one submission to completion per call. It keeps no mutable state,
//! so callers only have to avoid submitting two batches at the same time.
//!
//! # Navigation
//! - Bulk entrypoint: [`DailyProgrammerHelper::parse_channel_history`]
//! - Single message entrypoint: [`DailyProgrammerHelper::parse_message`]

use tracing::{debug, error, info};

use crate::aggregate::aggregate_history;
use crate::config::HelperConfig;
use crate::contract::{
    ChallengeWriter, ChannelHistory, Message, TransformError, WriteError, WriteMode,
};
use crate::publish::GitPublisher;
use crate::transform::format_message;
use crate::writer::FileWriter;

/// What a history run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryReport {
    pub messages: usize,
    pub challenges: usize,
    pub written: bool,
}

/// What a single-message run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageReport {
    Written,
    Skipped,
}

pub struct DailyProgrammerHelper<W: ChallengeWriter> {
    writer: W,
}

impl DailyProgrammerHelper<FileWriter<GitPublisher>> {
    /// The production wiring: write to the configured file, publish with git.
    pub fn from_config(config: &HelperConfig) -> Self {
        config.trace_loaded();
        let publisher = GitPublisher::new(config);
        Self::new(FileWriter::new(config, publisher))
    }
}

impl<W: ChallengeWriter> DailyProgrammerHelper<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Render all challenges of `history` and replace the target file with them.
    ///
    /// Nothing is written (or published) when no message is a challenge.
    pub async fn parse_channel_history(
        &self,
        history: &ChannelHistory,
    ) -> Result<HistoryReport, WriteError> {
        self.parse_channel_history_with_mode(history, WriteMode::Overwrite)
            .await
    }

    pub async fn parse_channel_history_with_mode(
        &self,
        history: &ChannelHistory,
        mode: WriteMode,
    ) -> Result<HistoryReport, WriteError> {
        let messages = history.messages.len();
        let Some(blob) = aggregate_history(history) else {
            info!(messages, "No challenge found in history, nothing to write");
            return Ok(HistoryReport {
                messages,
                challenges: 0,
                written: false,
            });
        };

        if let Err(e) = self.writer.write(&blob.content, mode).await {
            error!(error = %e, "Failed to write history");
            return Err(e);
        }
        info!(messages, challenges = blob.challenges, "Done");
        Ok(HistoryReport {
            messages,
            challenges: blob.challenges,
            written: true,
        })
    }

    /// Render a single message and append it to the target file.
    ///
    /// A message that is not a challenge is skipped silently.
    pub async fn parse_message(&self, message: &Message) -> Result<MessageReport, WriteError> {
        self.parse_message_with_mode(message, WriteMode::Append)
            .await
    }

    pub async fn parse_message_with_mode(
        &self,
        message: &Message,
        mode: WriteMode,
    ) -> Result<MessageReport, WriteError> {
        let text = match format_message(message) {
            Ok(text) => text,
            Err(TransformError::NotAChallenge { .. }) => {
                debug!("Message is not a challenge, skipping");
                return Ok(MessageReport::Skipped);
            }
        };
        self.writer.write(&text, mode).await?;
        info!("Done");
        Ok(MessageReport::Written)
    }
}
