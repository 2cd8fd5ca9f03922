//! Informational-query detection.
//!
//! Questions about status or code ("show me", "where is", ...) are not work
//! requests and must never be flagged as drift.

use std::sync::OnceLock;

use regex::Regex;

/// Start-anchored patterns, tested in order against the trimmed, lowercased
/// prompt. The first match wins.
const INFO_PATTERNS: &[&str] = &[
    r"^what('s| is) the status",
    r"^how('s| is) .* going",
    r"^show me",
    r"^list( all)?",
    r"^tell me about",
    r"^explain",
    r"^what does .* do",
    r"^how does .* work",
    r"^where is",
    r"^can you (show|explain|tell)",
];

fn info_patterns() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        INFO_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("informational pattern is valid"))
            .collect()
    })
}

/// Returns the pattern that classifies `prompt` as informational, if any.
pub(crate) fn informational_pattern(prompt: &str) -> Option<&'static str> {
    let normalized = prompt.trim().to_lowercase();
    info_patterns()
        .iter()
        .zip(INFO_PATTERNS)
        .find(|(re, _)| re.is_match(&normalized))
        .map(|(_, pattern)| *pattern)
}
