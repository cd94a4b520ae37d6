//! `load_config` module: reads the repository settings file.
//!
//! The file is YAML with a single `GitRepoInfo` section:
//!
//! ```yaml
//! GitRepoInfo:
//!   repo: git@github.com:73VW/Daily-Programmer-Bot.git
//! ```
//!
//! [`load_config`] is strict and reports exactly what is wrong. [`load_repo_url`]
//! is what the CLI uses: any problem is logged with the expected format and the
//! default repository is used instead.

use daily_programmer_core::config::DEFAULT_REPO_URL;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const SECTION: &str = "GitRepoInfo";
const KEY: &str = "repo";

/// Repository settings read from the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoConfig {
    pub repo_url: String,
}

/// The ways a config file can be invalid.
#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_yaml::Error },
    MissingSection { path: PathBuf },
    MissingOption { path: PathBuf },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "Invalid {} file: cannot read it: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "Invalid {} file: {source}", path.display())
            }
            ConfigError::MissingSection { path } => {
                write!(f, "Invalid {} file: missing section {SECTION}", path.display())
            }
            ConfigError::MissingOption { path } => write!(
                f,
                "Invalid {} file: check option \"{KEY}\" in section \"{SECTION}\"",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "GitRepoInfo")]
    git_repo_info: Option<GitRepoInfo>,
}

#[derive(Debug, Deserialize)]
struct GitRepoInfo {
    repo: Option<String>,
}

/// Loads the repository settings, failing on any missing or malformed part.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RepoConfig, ConfigError> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = fs::read_to_string(path_ref).map_err(|e| ConfigError::Read {
        path: path_ref.to_path_buf(),
        source: e,
    })?;

    let raw: Option<RawConfig> =
        serde_yaml::from_str(&config_content).map_err(|e| ConfigError::Parse {
            path: path_ref.to_path_buf(),
            source: e,
        })?;

    let section = raw
        .and_then(|r| r.git_repo_info)
        .ok_or_else(|| ConfigError::MissingSection {
            path: path_ref.to_path_buf(),
        })?;

    let repo_url = section
        .repo
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .ok_or_else(|| ConfigError::MissingOption {
            path: path_ref.to_path_buf(),
        })?;

    info!(config_path = ?path_ref, repo_url = %repo_url, "Config loaded successfully");
    Ok(RepoConfig { repo_url })
}

/// The repository URL from the config file, or [`DEFAULT_REPO_URL`] when the
/// file is missing or invalid.
pub fn load_repo_url<P: AsRef<Path>>(path: P) -> String {
    match load_config(path) {
        Ok(config) => config.repo_url,
        Err(e) => {
            error!(error = %e, "{}", expected_format_hint(&e));
            warn!(repo_url = DEFAULT_REPO_URL, "Using default repo");
            DEFAULT_REPO_URL.to_string()
        }
    }
}

fn expected_format_hint(e: &ConfigError) -> String {
    format!(
        "{e}\nContent should look like:\n{SECTION}:\n  {KEY}: {DEFAULT_REPO_URL}\n\nUSING DEFAULT REPO"
    )
}
