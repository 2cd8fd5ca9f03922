//! Task title suggestions for prompts that match no known work.

use std::sync::OnceLock;

use regex::Regex;

use super::lexical::{mentions_any, BUG_INDICATORS};
use super::result::FALLBACK_TITLE;

const MAX_TITLE_CHARS: usize = 60;
const TRUNCATED_CHARS: usize = 57;

/// Polite or imperative lead-ins, stripped in this order.
const PREFIXES: &[&str] = &[
    r"(?i)^please\s+",
    r"(?i)^can you\s+",
    r"(?i)^could you\s+",
    r"(?i)^i want to\s+",
    r"(?i)^i need to\s+",
    r"(?i)^help me\s+",
    r"(?i)^let's\s+",
];

fn prefix_patterns() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        PREFIXES.iter().map(|p| Regex::new(p).expect("prefix pattern is valid")).collect()
    })
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derives a short task title from a free-text prompt.
pub(crate) fn suggest_title(prompt: &str) -> String {
    let mut title = prompt.trim().to_string();
    for re in prefix_patterns() {
        title = re.replace(&title, "").into_owned();
    }

    let mut title = capitalize_first(title.trim());
    if title.chars().count() > MAX_TITLE_CHARS {
        title = title.chars().take(TRUNCATED_CHARS).collect::<String>() + "...";
    }

    let lowered = title.to_lowercase();
    if mentions_any(&lowered, BUG_INDICATORS) && !lowered.starts_with("fix") {
        title = format!("Fix: {title}");
    }

    if title.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        title
    }
}
