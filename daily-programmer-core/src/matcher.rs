use regex::Regex;
use std::sync::LazyLock;

static CHALLENGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"===?\s+([\w\s]+)\-?[\w\s]*\s+=?==").expect("challenge pattern is valid")
});

/// The banner pattern identifying a challenge announcement (`=== <words> ===`,
/// optionally with a trailing `- <qualifier>`).
pub fn challenge_pattern() -> &'static Regex {
    &CHALLENGE_REGEX
}

/// Whether `text` is a challenge announcement. Absent or empty text never is.
pub fn is_challenge(text: Option<&str>) -> bool {
    match text {
        Some(text) if !text.is_empty() => CHALLENGE_REGEX.is_match(text),
        _ => false,
    }
}
