#![allow(unused)]

//! # contract: data types, errors and seams of the challenge pipeline
//!
//! This module holds the plain data flowing through the pipeline
//! ([`Message`], [`ChannelHistory`], [`WriteMode`]), the typed errors each stage
//! can return, and the two traits that separate the stages:
//!
//! - [`ChallengeWriter`]: persists rendered Markdown to the target file.
//! - [`Publisher`]: pushes the output directory to the publishing branch.
//!
//! ## Mocking & Testing
//! - Both traits are annotated for `mockall` so the helper and the writer can be
//!   exercised without touching the filesystem or the network.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use mockall::{automock, predicate::*};
use serde::Deserialize;

/// A single chat message as delivered by the chat history collaborator.
///
/// Only `text` is used; every other field of the upstream record is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub text: Option<String>,
}

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// A message without any text (file uploads, joins, etc.).
    pub fn empty() -> Self {
        Self { text: None }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// A channel history batch, newest message first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChannelHistory {
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl ChannelHistory {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// How the target file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Add the content after what is already in the file.
    Append,
    /// Replace the whole file with the content.
    Overwrite,
}

impl FromStr for WriteMode {
    type Err = WriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" | "append" => Ok(WriteMode::Append),
            "w" | "overwrite" => Ok(WriteMode::Overwrite),
            other => Err(WriteError::InvalidWriteMode(other.to_string())),
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteMode::Append => write!(f, "append"),
            WriteMode::Overwrite => write!(f, "overwrite"),
        }
    }
}

/// Raised when a message is not a challenge announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    NotAChallenge { message: Message },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::NotAChallenge { .. } => {
                write!(f, "the message doesn't match the challenge pattern")
            }
        }
    }
}

impl std::error::Error for TransformError {}

/// Errors from the git publishing step.
#[derive(Debug)]
pub enum PublishError {
    /// `git` could not be launched at all.
    Io(std::io::Error),
    /// `git` ran but exited with a failure status.
    Git {
        step: String,
        status: Option<i32>,
        stderr: String,
    },
}

impl From<std::io::Error> for PublishError {
    fn from(e: std::io::Error) -> Self {
        PublishError::Io(e)
    }
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishError::Io(e) => write!(f, "failed to launch git: {e}"),
            PublishError::Git {
                step,
                status,
                stderr,
            } => match status {
                Some(code) => write!(f, "`git {step}` exited with code {code}: {stderr}"),
                None => write!(f, "`git {step}` was terminated by a signal: {stderr}"),
            },
        }
    }
}

impl std::error::Error for PublishError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PublishError::Io(e) => Some(e),
            PublishError::Git { .. } => None,
        }
    }
}

/// Errors from persisting (and then publishing) rendered challenges.
#[derive(Debug)]
pub enum WriteError {
    /// The requested mode is neither append nor overwrite.
    InvalidWriteMode(String),
    Io(std::io::Error),
    Publish(PublishError),
}

impl From<std::io::Error> for WriteError {
    fn from(e: std::io::Error) -> Self {
        WriteError::Io(e)
    }
}

impl From<PublishError> for WriteError {
    fn from(e: PublishError) -> Self {
        WriteError::Publish(e)
    }
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::InvalidWriteMode(mode) => {
                write!(f, "given mode {mode:?} isn't 'a' (append) or 'w' (overwrite)")
            }
            WriteError::Io(e) => write!(f, "failed to write challenges to disk: {e}"),
            WriteError::Publish(e) => write!(f, "failed to publish challenges: {e}"),
        }
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WriteError::InvalidWriteMode(_) => None,
            WriteError::Io(e) => Some(e),
            WriteError::Publish(e) => Some(e),
        }
    }
}

/// Which of the two publishing paths ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoState {
    /// The output directory already is a git working tree: amend and force-push.
    Existing,
    /// The output directory is not a repository yet: initialise, commit, push upstream.
    Fresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub state: RepoState,
    pub branch: String,
}

/// Trait for synchronising the output directory with the remote publishing branch.
///
/// Implemented by the git-backed publisher and by test mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Commit the current state of the output directory and push it.
    async fn publish(&self) -> Result<PublishOutcome, PublishError>;
}

/// Trait for persisting rendered challenges.
///
/// A successful write is followed by exactly one publish; a failed one is not.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ChallengeWriter: Send + Sync {
    /// Write `content` verbatim to the target file using `mode`.
    async fn write(&self, content: &str, mode: WriteMode) -> Result<(), WriteError>;
}
