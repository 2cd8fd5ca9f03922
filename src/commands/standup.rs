//! `overseer standup` command.

use std::fmt::Display;
use std::path::Path;

use chrono::TimeZone;

use crate::context::ServiceContext;
use crate::store::{days_before, SessionStore, TaskStore};
use crate::task::{Task, TaskStatus};

const CONTEXT_WIDTH: usize = 60;
const BACKLOG_PREVIEW: usize = 5;

/// Execute the `standup` command.
///
/// # Errors
///
/// Returns an error string if the task or session files cannot be read.
pub fn run(ctx: &ServiceContext, root: &Path, include_backlog: bool) -> Result<(), String> {
    let report =
        render(&TaskStore::new(ctx, root), &SessionStore::new(ctx, root), include_backlog)?;
    println!("{report}");
    Ok(())
}

fn render<Tz>(
    tasks: &TaskStore<'_>,
    sessions: &SessionStore<'_, Tz>,
    include_backlog: bool,
) -> Result<String, String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let all = tasks.list_tasks(None)?;
    let today = sessions.today();
    let yesterday = days_before(today, 1)?;
    let with_status = |status: TaskStatus| all.iter().filter(move |t| t.status == status);

    let mut lines = vec![format!("## Daily Standup - {today}"), String::new()];

    let finished: Vec<&Task> = with_status(TaskStatus::Done)
        .filter(|t| sessions.day_of(t.updated_at) == yesterday)
        .collect();
    let yesterday_sessions = sessions.sessions_for_day(yesterday)?;
    if !finished.is_empty() || !yesterday_sessions.is_empty() {
        lines.push("### Completed Yesterday".to_string());
        lines.extend(finished.iter().map(|t| format!("- [x] {}: {}", t.id, t.title)));
        lines.extend(
            yesterday_sessions
                .iter()
                .filter(|s| !finished.iter().any(|t| s.task_id.as_deref() == Some(t.id.as_str())))
                .map(|s| format!("- {}", s.summary)),
        );
        lines.push(String::new());
    }

    let active: Vec<&Task> = with_status(TaskStatus::Active).collect();
    if !active.is_empty() {
        lines.push("### In Progress".to_string());
        for task in &active {
            lines.push(format!("- [>] {}: {} ({})", task.id, task.title, task.task_type));
            if let Some(context) = task.context.as_deref().filter(|c| !c.is_empty()) {
                let first = context.split('\n').next().unwrap_or_default();
                lines.push(format!("    {}", truncate(first)));
            }
        }
        lines.push(String::new());
    }

    let blocked: Vec<&Task> = with_status(TaskStatus::Blocked).collect();
    if !blocked.is_empty() {
        lines.push("### Blocked".to_string());
        for task in &blocked {
            lines.push(format!("- [!] {}: {}", task.id, task.title));
            let reason = task
                .context
                .as_deref()
                .and_then(|c| c.split('\n').find(|line| line.starts_with("Blocked:")));
            if let Some(reason) = reason {
                lines.push(format!("    {reason}"));
            }
        }
        lines.push(String::new());
    }

    let today_sessions = sessions.sessions_for_day(today)?;
    if !today_sessions.is_empty() {
        lines.push("### Today's Progress".to_string());
        for session in &today_sessions {
            let task = session.task_id.as_deref().map(|id| format!(" ({id})")).unwrap_or_default();
            lines.push(format!("- {}{task}", session.summary));
        }
        lines.push(String::new());
    }

    let backlog: Vec<&Task> = with_status(TaskStatus::Backlog).collect();
    if include_backlog && !backlog.is_empty() {
        lines.push("### Backlog".to_string());
        for task in backlog.iter().take(BACKLOG_PREVIEW) {
            lines.push(format!("- [ ] {}: {} ({})", task.id, task.title, task.task_type));
        }
        if backlog.len() > BACKLOG_PREVIEW {
            lines.push(format!("    ... and {} more", backlog.len() - BACKLOG_PREVIEW));
        }
        lines.push(String::new());
    }

    let quiet = finished.is_empty()
        && yesterday_sessions.is_empty()
        && active.is_empty()
        && blocked.is_empty()
        && today_sessions.is_empty();
    if quiet {
        lines.push("No activity to report. Use `overseer add` to create tasks.".to_string());
    }
    Ok(lines.join("\n"))
}

/// Cuts `line` to fit the context column, marking the cut with `...`.
fn truncate(line: &str) -> String {
    if line.chars().count() > CONTEXT_WIDTH {
        let kept: String = line.chars().take(CONTEXT_WIDTH - 3).collect();
        format!("{kept}...")
    } else {
        line.to_string()
    }
}
