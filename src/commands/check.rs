//! `overseer check` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::drift::{DriftDetector, MatchResult, MatchStrength, Outcome};
use crate::store::TaskStore;
use crate::task::TaskStatus;

/// Execute the `check` command.
///
/// Compares `prompt` against the active tasks. With `remote`, a configured
/// Jira search (or a replay cassette) is consulted when nothing local matches.
///
/// # Errors
///
/// Returns an error string if the store or config cannot be read, or the
/// result cannot be serialized.
pub fn run(
    ctx: &mut ServiceContext,
    root: &Path,
    prompt: &str,
    remote: bool,
    json: bool,
) -> Result<(), String> {
    let store = TaskStore::new(ctx, root);
    let tasks = store.list_tasks(Some(TaskStatus::Active))?;
    let jira = store.load_config()?.jira.with_env_overrides();
    tracing::debug!(active = tasks.len(), remote, "checking prompt");

    if remote {
        ctx.connect_issues(&jira)?;
    }
    let detector = DriftDetector::new(&tasks);
    let result = match (remote, ctx.issues()) {
        (true, Some(search)) => {
            let detector = detector.with_remote(search, jira.project_key.as_deref());
            super::runtime()?.block_on(detector.check_with_remote(prompt))
        }
        (true, None) => {
            eprintln!("Jira not configured; checking local tasks only.");
            detector.check(prompt)
        }
        (false, _) => detector.check(prompt),
    };

    if json {
        let out = serde_json::to_string_pretty(&result)
            .map_err(|e| format!("Failed to serialize result: {e}"))?;
        println!("{out}");
    } else {
        print!("{}", render(&result));
    }
    Ok(())
}

fn render(result: &MatchResult<'_>) -> String {
    let summary = match result.outcome() {
        Outcome::Informational => {
            return "✓ Informational query - not a task.\n\nProceed with the work.\n".to_string();
        }
        Outcome::Suggestion { title, closest } => {
            let mut out = format!(
                "⚠ No matching task found - possible scope drift!\n\nSuggested title: {title}\n"
            );
            if let Some(task) = closest {
                out.push_str(&format!(
                    "Closest task: {}: {} ({})\n",
                    task.id,
                    task.title,
                    percent(result.confidence())
                ));
            }
            out.push_str(&format!(
                "\nBefore proceeding, ask the user:\n\
                 \"This looks like new work. Should I add '{title}' to the backlog first?\"\n"
            ));
            return out;
        }
        Outcome::Task(task) => {
            let mut out = format!(
                "Matched {}: {}\nConfidence: {} ({})\nReason: {}",
                task.id,
                task.title,
                percent(result.confidence()),
                result.strength(),
                reasons(result, "keyword match")
            );
            if let Some(key) = &task.external_key {
                out.push_str(&format!("\nJira: {key}"));
            }
            out
        }
        Outcome::Remote(issue) => format!(
            "Found Jira issue: {}\nSummary: {}\nStatus: {} | Type: {}\nReason: {}",
            issue.key,
            issue.title,
            issue.status,
            issue.issue_type,
            reasons(result, "Jira search")
        ),
    };

    match result.strength() {
        MatchStrength::Strong => format!("✓ Strong match found!\n{summary}\n\nProceed with the work.\n"),
        MatchStrength::Weak | MatchStrength::None => format!(
            "~ Possible match found.\n{summary}\n\n\
             This might be related to the matched task. \
             Proceed, but confirm if this is the intended work.\n"
        ),
    }
}

fn percent(confidence: f64) -> String {
    format!("{:.0}%", confidence * 100.0)
}

fn reasons(result: &MatchResult<'_>, fallback: &str) -> String {
    if result.reasons().is_empty() {
        fallback.to_string()
    } else {
        result.reasons().join(", ")
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::drift::REMOTE_CONFIDENCE;
    use crate::ports::RemoteIssue;
    use crate::task::{Origin, Task, TaskType};

    fn task(id: &str, title: &str) -> Task {
        let now = Utc::now();
        Task {
            id: id.into(),
            title: title.into(),
            status: TaskStatus::Active,
            task_type: TaskType::Feature,
            created_by: Origin::Human,
            context: None,
            linked_files: vec![],
            external_key: Some("OPS-9".into()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn renders_explicit_reference_as_strong() {
        let tasks = vec![task("TASK-1", "Add login page")];
        let out = render(&DriftDetector::new(&tasks).check("continue TASK-1"));
        assert_eq!(
            out,
            "✓ Strong match found!\n\
             Matched TASK-1: Add login page\n\
             Confidence: 100% (strong)\n\
             Reason: Explicit task reference\n\
             Jira: OPS-9\n\n\
             Proceed with the work.\n"
        );
    }

    #[test]
    fn renders_drift_with_suggestion() {
        let tasks = vec![task("TASK-1", "Add login page")];
        let out = render(&DriftDetector::new(&tasks).check("refactor the billing export"));
        assert!(out.starts_with("⚠ No matching task found - possible scope drift!"), "{out}");
        assert!(out.contains("Suggested title: Refactor the billing export"), "{out}");
        assert!(out.contains("Should I add 'Refactor the billing export' to the backlog first?"));
    }

    #[test]
    fn renders_informational_query() {
        let out = render(&DriftDetector::new(&[]).check("what does the router do?"));
        assert!(out.starts_with("✓ Informational query"), "{out}");
    }

    #[test]
    fn renders_remote_match_as_possible() {
        let issue = RemoteIssue {
            key: "OPS-4".into(),
            title: "Rotate staging credentials".into(),
            status: "To Do".into(),
            issue_type: "Task".into(),
            assignee: None,
            description: None,
        };
        let out = render(&MatchResult::remote(issue, REMOTE_CONFIDENCE));
        assert!(out.starts_with("~ Possible match found.\nFound Jira issue: OPS-4\n"), "{out}");
        assert!(out.contains("Status: To Do | Type: Task\nReason: Remote issue match: OPS-4"));
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(percent(0.456), "46%");
        assert_eq!(percent(1.0), "100%");
    }
}
