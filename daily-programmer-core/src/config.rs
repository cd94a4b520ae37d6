use std::path::PathBuf;
use tracing::{debug, info};

/// Remote used when no valid configuration is found.
pub const DEFAULT_REPO_URL: &str = "git@github.com:73VW/Daily-Programmer-Bot.git";

pub const DEFAULT_OUTPUT_DIR: &str = "ToBePublished/";
pub const DEFAULT_FILENAME: &str = "index.md";
pub const REMOTE_NAME: &str = "origin";
pub const PUBLISH_BRANCH: &str = "gh-pages";

/// Everything the pipeline needs to know, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperConfig {
    pub output_dir: PathBuf,
    pub filename: String,
    pub repo_url: String,
    pub remote_name: String,
    pub branch: String,
    pub committer: Committer,
    pub initial_commit_message: String,
}

/// Identity written into the local git config of a freshly initialised repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committer {
    pub name: String,
    pub email: String,
}

impl Default for Committer {
    fn default() -> Self {
        Self {
            name: "Daily Programmer Bot".to_string(),
            email: "daily@programmer.bot".to_string(),
        }
    }
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            filename: DEFAULT_FILENAME.to_string(),
            repo_url: DEFAULT_REPO_URL.to_string(),
            remote_name: REMOTE_NAME.to_string(),
            branch: PUBLISH_BRANCH.to_string(),
            committer: Committer::default(),
            initial_commit_message: format!("Deploying to {PUBLISH_BRANCH}"),
        }
    }
}

impl HelperConfig {
    /// Default configuration publishing to `repo_url`.
    pub fn with_repo_url(repo_url: impl Into<String>) -> Self {
        Self {
            repo_url: repo_url.into(),
            ..Self::default()
        }
    }

    pub fn target_path(&self) -> PathBuf {
        self.output_dir.join(&self.filename)
    }

    pub fn trace_loaded(&self) {
        info!(
            output_dir = %self.output_dir.display(),
            repo_url = %self.repo_url,
            branch = %self.branch,
            "Loaded HelperConfig"
        );
        debug!(?self, "HelperConfig loaded (full debug)");
    }
}
