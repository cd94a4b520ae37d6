//! Rendering of a single challenge message into Markdown.
//!
//! Slack messages announcing a challenge look like:
//!
//! ~~~text
//! *=== Wednesday October 27th 2020 - Daily Programmer ===*
//!
//! *[Binary Tree Postorder Traversal]*
//! ```Input: root = []
//! Output: []```
//! <https://assets.leetcode.com/uploads/2020/08/28/pre1.jpg>
//! ~~~
//!
//! and are rendered as:
//!
//! ~~~text
//! ## Binary Tree Postorder Traversal -- Wednesday October 27th 2020
//! ```
//! Input: root = []
//! Output: []
//! ```
//! ![Illustration](https://assets.leetcode.com/uploads/2020/08/28/pre1.jpg)
//! ~~~
//!
//! The steps run in a fixed order: title, code blocks, images.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;

use crate::contract::{Message, TransformError};
use crate::matcher::is_challenge;

static TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*={3}\s(.*)\s-\sDaily\sProgrammer\s={3}\*\n*?\*\[(.*)\]\*")
        .expect("title pattern is valid")
});

static CODE_BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```([^`]*?)```").expect("code block pattern is valid"));

static IMAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(https://assets\.leetcode\.com/uploads/.*?)>").expect("image pattern is valid")
});

const HEADING_PREFIX: &str = "## ";

/// Render one message as a challenge document.
///
/// Fails with [`TransformError::NotAChallenge`] when the text is absent or does
/// not carry the challenge banner; the caller is expected to skip the message.
pub fn format_message(message: &Message) -> Result<String, TransformError> {
    let text = match message.text.as_deref() {
        Some(text) if is_challenge(Some(text)) => text,
        _ => {
            return Err(TransformError::NotAChallenge {
                message: message.clone(),
            })
        }
    };

    let text = format_title(text);
    let text = format_code_blocks(&text);
    let text = format_images(&text);
    debug!(length = text.len(), "Formatted challenge message");
    Ok(text)
}

/// Turn the banner and bracketed title into `<title> -- <date>` and prefix the
/// document with a level-2 heading marker.
pub fn format_title(text: &str) -> String {
    let titled = TITLE_REGEX.replace_all(text, "${2} -- ${1}");
    format!("{HEADING_PREFIX}{titled}")
}

/// Put Slack's inline fences on their own lines.
///
/// Newlines already adjacent to a fence are absorbed, so running this on
/// normalized text leaves it unchanged.
pub fn format_code_blocks(text: &str) -> String {
    CODE_BLOCK_REGEX
        .replace_all(text, |caps: &Captures| {
            format!("```\n{}\n```", caps[1].trim_matches('\n'))
        })
        .into_owned()
}

/// Turn bracketed LeetCode asset links into Markdown images.
pub fn format_images(text: &str) -> String {
    IMAGE_REGEX
        .replace_all(text, "![Illustration](${1})\n")
        .into_owned()
}
