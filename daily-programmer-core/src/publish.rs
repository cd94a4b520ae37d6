//! Publishing of the output directory to the `gh-pages` branch.
//!
//! The output directory is its own git working tree. Two situations exist:
//!
//! - [`RepoState::Existing`]: stage everything, amend the tip commit keeping its
//!   message, force-push. The remote branch always holds a single snapshot.
//! - [`RepoState::Fresh`]: initialise the repository, set the bot identity, add
//!   the remote, make the initial commit on the publishing branch, fetch and
//!   force-push with `--set-upstream`.
//!
//! The state is resolved once before any command runs. Failures are returned as
//! they happen; commands already run are not undone.

use std::path::{Path, PathBuf};
use std::process::Output;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::config::{Committer, HelperConfig};
use crate::contract::{PublishError, PublishOutcome, Publisher, RepoState};

impl RepoState {
    /// `Existing` only when `dir` is the top of a working tree, including linked
    /// worktrees and submodules whose `.git` is a file. A directory nested
    /// inside some other repository is `Fresh`.
    pub async fn detect(dir: &Path) -> RepoState {
        let Ok(dir) = dir.canonicalize() else {
            return RepoState::Fresh;
        };
        let output = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(&dir)
            .output()
            .await;
        match output {
            Ok(out) if out.status.success() => {
                let toplevel = String::from_utf8_lossy(&out.stdout);
                match Path::new(toplevel.trim()).canonicalize() {
                    Ok(toplevel) if toplevel == dir => RepoState::Existing,
                    _ => RepoState::Fresh,
                }
            }
            _ => RepoState::Fresh,
        }
    }
}

/// Publishes the output directory by shelling out to `git`.
pub struct GitPublisher {
    repo_dir: PathBuf,
    repo_url: String,
    remote_name: String,
    branch: String,
    committer: Committer,
    initial_commit_message: String,
}

impl GitPublisher {
    pub fn new(config: &HelperConfig) -> Self {
        Self {
            repo_dir: config.output_dir.clone(),
            repo_url: config.repo_url.clone(),
            remote_name: config.remote_name.clone(),
            branch: config.branch.clone(),
            committer: config.committer.clone(),
            initial_commit_message: config.initial_commit_message.clone(),
        }
    }

    async fn git(&self, args: &[&str]) -> Result<Output, PublishError> {
        let step = args.join(" ");
        debug!(step = %step, dir = %self.repo_dir.display(), "Running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .await
            .map_err(|e| {
                error!(error = ?e, step = %step, "Failed to launch git process");
                PublishError::Io(e)
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!(
                step = %step,
                status = ?output.status.code(),
                stderr = %stderr,
                "Git exited with non-zero code"
            );
            return Err(PublishError::Git {
                step,
                status: output.status.code(),
                stderr,
            });
        }
        Ok(output)
    }

    async fn publish_existing(&self) -> Result<(), PublishError> {
        self.git(&["add", "."]).await?;
        self.git(&["commit", "--amend", "--no-edit"]).await?;
        self.git(&["push", "-f"]).await?;
        Ok(())
    }

    async fn publish_fresh(&self) -> Result<(), PublishError> {
        self.git(&["init"]).await?;
        self.git(&["config", "user.name", self.committer.name.as_str()]).await?;
        self.git(&["config", "user.email", self.committer.email.as_str()]).await?;
        self.git(&["remote", "add", self.remote_name.as_str(), self.repo_url.as_str()])
            .await?;
        self.git(&["add", "."]).await?;
        self.git(&["commit", "-m", self.initial_commit_message.as_str()])
            .await?;
        self.git(&["checkout", "-b", self.branch.as_str()]).await?;
        self.git(&["fetch", self.remote_name.as_str()]).await?;
        self.git(&[
            "push",
            "-f",
            "--set-upstream",
            self.remote_name.as_str(),
            self.branch.as_str(),
        ])
        .await?;
        Ok(())
    }
}

#[async_trait]
impl Publisher for GitPublisher {
    async fn publish(&self) -> Result<PublishOutcome, PublishError> {
        let state = RepoState::detect(&self.repo_dir).await;
        info!(?state, dir = %self.repo_dir.display(), "Publishing result");

        match state {
            RepoState::Existing => self.publish_existing().await?,
            RepoState::Fresh => self.publish_fresh().await?,
        }

        info!(branch = %self.branch, remote = %self.remote_name, "Done publishing");
        Ok(PublishOutcome {
            state,
            branch: self.branch.clone(),
        })
    }
}
