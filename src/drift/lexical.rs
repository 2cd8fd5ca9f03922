//! Lexical scoring of a prompt against candidate tasks.
//!
//! Each candidate gets the sum of independent signals (keyword overlap,
//! linked-file overlap, loose basename mention, type vocabulary), capped at
//! 1.0 on the aggregate. The strictly highest score wins; ties keep the
//! earlier candidate.

use std::collections::{BTreeSet, HashSet};
use std::sync::OnceLock;

use regex::Regex;

use crate::task::{Task, TaskType};

/// Weight applied to the keyword overlap ratio.
const KEYWORD_WEIGHT: f64 = 0.6;
/// Flat score when a prompt file token equals a linked file.
const FILE_OVERLAP_SCORE: f64 = 0.8;
/// Flat score when a linked file's basename appears in the prompt.
const BASENAME_SCORE: f64 = 0.5;
const BUG_BONUS: f64 = 0.3;
const FEATURE_BONUS: f64 = 0.2;

/// Common English words that carry no task signal.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "shall",
    "can", "need", "dare", "ought", "used", "to", "of", "in", "for", "on", "with", "at", "by",
    "from", "as", "into", "through", "during", "before", "after", "above", "below", "between",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why", "how",
    "all", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only",
    "own", "same", "so", "than", "too", "very", "just", "also", "now", "and", "but", "or", "if",
    "because", "until", "while", "although", "though", "i", "me", "my", "we", "our", "you",
    "your", "it", "its", "this", "that", "these", "those", "what", "which", "who", "whom",
    "please", "help", "want", "like", "get", "make", "let", "try", "use",
];

/// Words that suggest a defect report. Matched as substrings.
pub(crate) const BUG_INDICATORS: &[&str] =
    &["bug", "fix", "broken", "error", "crash", "issue", "problem", "fail", "wrong"];

/// Words that suggest new functionality. Matched as substrings.
pub(crate) const FEATURE_INDICATORS: &[&str] =
    &["add", "create", "implement", "build", "new", "feature"];

fn word_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-z][a-z0-9_]*").expect("word pattern is valid"))
}

fn file_patterns() -> &'static [Regex; 2] {
    static RE: OnceLock<[Regex; 2]> = OnceLock::new();
    RE.get_or_init(|| {
        [
            // path/to/file.ext
            Regex::new(r"[\w\-/]+\.[a-zA-Z]{1,4}").expect("file pattern is valid"),
            // dotted.module.path
            Regex::new(r"[\w\-]+(?:\.[\w\-]+)+").expect("module pattern is valid"),
        ]
    })
}

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

/// Extracts meaningful lowercase keywords, deduplicated, in order of first
/// appearance.
pub(crate) fn keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut seen = HashSet::new();
    word_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| w.len() > 2 && !stop_words().contains(w))
        .filter(|w| seen.insert(*w))
        .map(str::to_string)
        .collect()
}

/// Extracts file-like tokens (`src/nav.tsx`, `auth.service.ts`), lowercased.
pub(crate) fn file_references(text: &str) -> BTreeSet<String> {
    file_patterns()
        .iter()
        .flat_map(|re| re.find_iter(text).map(|m| m.as_str().to_lowercase()))
        .collect()
}

/// Returns `true` if any indicator appears anywhere in `lowered`.
pub(crate) fn mentions_any(lowered: &str, indicators: &[&str]) -> bool {
    indicators.iter().any(|w| lowered.contains(w))
}

/// File name without directories or its last extension.
fn basename(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    let stem = match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => &name[..idx],
        _ => name,
    };
    stem.to_lowercase()
}

/// Everything the matcher needs from the prompt, computed once per check.
#[derive(Debug)]
pub(crate) struct PromptSignals {
    lowered: String,
    keywords: Vec<String>,
    files: BTreeSet<String>,
}

impl PromptSignals {
    pub(crate) fn new(prompt: &str) -> Self {
        Self {
            lowered: prompt.to_lowercase(),
            keywords: keywords(prompt),
            files: file_references(prompt),
        }
    }

    pub(crate) fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

/// A candidate's aggregate score and the reasons behind it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Score {
    pub(crate) value: f64,
    pub(crate) reasons: Vec<String>,
}

/// Scores one task against the prompt.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn score_task(task: &Task, prompt: &PromptSignals) -> Score {
    let mut signals: Vec<f64> = Vec::new();
    let mut reasons = Vec::new();

    let mut task_text = task.title.clone();
    if let Some(context) = &task.context {
        task_text.push(' ');
        task_text.push_str(context);
    }
    let task_keywords: HashSet<String> = keywords(&task_text).into_iter().collect();

    if !prompt.keywords.is_empty() && !task_keywords.is_empty() {
        let mut overlap: Vec<&str> = prompt
            .keywords
            .iter()
            .filter(|k| task_keywords.contains(*k))
            .map(String::as_str)
            .collect();
        if !overlap.is_empty() {
            let ratio = overlap.len() as f64 / prompt.keywords.len() as f64;
            signals.push(ratio * KEYWORD_WEIGHT);
            overlap.sort_unstable();
            overlap.truncate(3);
            reasons.push(format!("Keywords: {}", overlap.join(", ")));
        }
    }

    if !task.linked_files.is_empty() && !prompt.files.is_empty() {
        let task_files: BTreeSet<String> =
            task.linked_files.iter().map(|f| f.to_lowercase()).collect();
        let shared: Vec<&str> =
            prompt.files.intersection(&task_files).take(2).map(String::as_str).collect();
        if !shared.is_empty() {
            signals.push(FILE_OVERLAP_SCORE);
            reasons.push(format!("Files: {}", shared.join(", ")));
        }
    }

    // An empty basename (".env") would match every prompt.
    if let Some(file) = task.linked_files.iter().find(|f| {
        let base = basename(f);
        !base.is_empty() && prompt.lowered.contains(&base)
    }) {
        signals.push(BASENAME_SCORE);
        reasons.push(format!("File reference: {file}"));
    }

    match task.task_type {
        TaskType::Bug if mentions_any(&prompt.lowered, BUG_INDICATORS) => {
            signals.push(BUG_BONUS);
            reasons.push("Bug-related request".to_string());
        }
        TaskType::Feature if mentions_any(&prompt.lowered, FEATURE_INDICATORS) => {
            signals.push(FEATURE_BONUS);
            reasons.push("Feature-related request".to_string());
        }
        _ => {}
    }

    if signals.is_empty() {
        return Score { value: 0.0, reasons: Vec::new() };
    }
    Score { value: signals.iter().sum::<f64>().min(1.0), reasons }
}

/// Finds the best-scoring candidate. Zero scores never win.
pub(crate) fn best_match<'a>(
    tasks: &'a [Task],
    prompt: &PromptSignals,
) -> Option<(&'a Task, Score)> {
    let mut best: Option<(&'a Task, Score)> = None;
    for task in tasks {
        let score = score_task(task, prompt);
        let best_value = best.as_ref().map_or(0.0, |(_, s)| s.value);
        if score.value > best_value {
            tracing::trace!(task = %task.id, score = score.value, "new best candidate");
            best = Some((task, score));
        }
    }
    best
}
