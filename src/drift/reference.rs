//! Explicit `TASK-<n>` references.

use std::sync::OnceLock;

use regex::Regex;

use super::result::MatchResult;
use crate::task::Task;

fn reference_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bTASK-(\d+)\b").expect("reference pattern is valid"))
}

/// Returns the first task id mentioned in `prompt`, normalised to `TASK-<n>`.
///
/// Later references are ignored.
pub(crate) fn find_reference(prompt: &str) -> Option<String> {
    reference_pattern()
        .captures(prompt)
        .and_then(|caps| caps.get(1))
        .map(|digits| format!("TASK-{}", digits.as_str()))
}

/// Resolves an explicit reference against the candidates.
///
/// Returns `None` when the prompt has no reference, so the caller moves on
/// to the next stage.
pub(crate) fn resolve<'a>(prompt: &str, tasks: &'a [Task]) -> Option<MatchResult<'a>> {
    let task_id = find_reference(prompt)?;
    let result = match tasks.iter().find(|t| t.id.eq_ignore_ascii_case(&task_id)) {
        Some(task) => MatchResult::explicit(task),
        None => MatchResult::unknown_reference(&task_id),
    };
    Some(result)
}
