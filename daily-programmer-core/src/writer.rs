use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{error, info};

use crate::config::HelperConfig;
use crate::contract::{ChallengeWriter, Publisher, WriteError, WriteMode};

/// Writes rendered challenges to the target file, then publishes the output directory.
pub struct FileWriter<P: Publisher> {
    output_dir: PathBuf,
    target: PathBuf,
    publisher: P,
}

impl<P: Publisher> FileWriter<P> {
    pub fn new(config: &HelperConfig, publisher: P) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            target: config.target_path(),
            publisher,
        }
    }

    pub fn target_path(&self) -> &Path {
        &self.target
    }

    /// Like [`ChallengeWriter::write`], but takes the mode as user input.
    ///
    /// An unknown mode is rejected before the filesystem is touched.
    pub async fn write_with_mode(&self, content: &str, mode: &str) -> Result<(), WriteError> {
        let mode = mode.parse::<WriteMode>().map_err(|e| {
            error!(mode, "Refusing to write with an unknown mode");
            e
        })?;
        self.write(content, mode).await
    }

    async fn write_to_disk(&self, content: &str, mode: WriteMode) -> Result<(), WriteError> {
        fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            error!(error = ?e, path = %self.output_dir.display(), "Failed to create output directory");
            WriteError::Io(e)
        })?;

        let mut options = OpenOptions::new();
        match mode {
            WriteMode::Append => options.append(true).create(true),
            WriteMode::Overwrite => options.write(true).truncate(true).create(true),
        };

        // The file is closed when it goes out of scope, error or not.
        let mut file = options.open(&self.target).await.map_err(|e| {
            error!(error = ?e, path = %self.target.display(), "Failed to open target file");
            WriteError::Io(e)
        })?;
        let written = match file.write_all(content.as_bytes()).await {
            Ok(()) => file.flush().await,
            Err(e) => Err(e),
        };
        written.map_err(|e| {
            error!(error = ?e, path = %self.target.display(), "Failed to write target file");
            WriteError::Io(e)
        })?;
        Ok(())
    }
}

#[async_trait]
impl<P: Publisher> ChallengeWriter for FileWriter<P> {
    async fn write(&self, content: &str, mode: WriteMode) -> Result<(), WriteError> {
        info!(path = %self.target.display(), %mode, bytes = content.len(), "Writing history to file");
        self.write_to_disk(content, mode).await?;
        info!("Done writing");

        let outcome = self.publisher.publish().await.map_err(|e| {
            error!(error = %e, "Publishing failed");
            WriteError::Publish(e)
        })?;
        info!(state = ?outcome.state, branch = %outcome.branch, "Published challenges");
        Ok(())
    }
}
