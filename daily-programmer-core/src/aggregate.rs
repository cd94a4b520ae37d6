use tracing::{debug, info};

use crate::contract::{ChannelHistory, TransformError};
use crate::transform::format_message;

/// Placed after every challenge document in a history blob.
pub const HISTORY_SEPARATOR: &str = "\n\n\n---\n\n\n";

/// Result of aggregating a channel history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryBlob {
    pub content: String,
    pub challenges: usize,
}

/// Render every challenge of a newest-first history, oldest first.
///
/// Messages that are not challenges are skipped. Returns `None` when nothing
/// matched so callers do not write an empty file.
pub fn aggregate_history(history: &ChannelHistory) -> Option<HistoryBlob> {
    info!(messages = history.messages.len(), "Parsing and formatting history");
    let mut content = String::new();
    let mut challenges = 0;

    for message in history.messages.iter().rev() {
        match format_message(message) {
            Ok(text) => {
                content.push_str(&text);
                content.push_str(HISTORY_SEPARATOR);
                challenges += 1;
            }
            Err(TransformError::NotAChallenge { .. }) => {
                debug!("Skipping message that is not a challenge");
            }
        }
    }

    info!(challenges, "Done parsing history");
    if content.is_empty() {
        None
    } else {
        Some(HistoryBlob {
            content,
            challenges,
        })
    }
}
