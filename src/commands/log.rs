//! `overseer log` command.

use std::fmt::Display;
use std::path::Path;

use chrono::TimeZone;

use crate::context::ServiceContext;
use crate::store::{SessionStore, TaskStore};
use crate::task::WorkSession;

/// Execute the `log` command.
///
/// Without `--task` the session is attributed to the focused task, if any.
///
/// # Errors
///
/// Returns an error string if the summary is empty, the named task does not
/// exist, or the store cannot be read or written.
pub fn run(
    ctx: &ServiceContext,
    root: &Path,
    summary: &str,
    task: Option<&str>,
    files: &[String],
) -> Result<(), String> {
    let sessions = SessionStore::new(ctx, root);
    let session = log_session(&TaskStore::new(ctx, root), &sessions, summary, task, files)?;
    println!("Logged session {}: {}", session.id, session.summary);
    Ok(())
}

fn log_session<Tz>(
    tasks: &TaskStore<'_>,
    sessions: &SessionStore<'_, Tz>,
    summary: &str,
    task: Option<&str>,
    files: &[String],
) -> Result<WorkSession, String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let summary = summary.trim();
    if summary.is_empty() {
        return Err("Session summary must not be empty.".to_string());
    }
    let task_id = match task {
        Some(id) => Some(tasks.get_task(id)?.ok_or_else(|| format!("Task {id} not found."))?.id),
        None => tasks.load_config()?.active_task_id,
    };
    sessions.log_session(summary, task_id.as_deref(), files)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::commands::test_support::seeded;
    use crate::commands::update;

    fn sessions<'a>(ctx: &'a ServiceContext, root: &Path) -> SessionStore<'a, Utc> {
        SessionStore::new(ctx, root).in_timezone(Utc)
    }

    #[test]
    fn explicit_task_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = seeded(dir.path(), &["Ship release"]);
        let tasks = TaskStore::new(&ctx, dir.path());

        let files = vec!["CHANGELOG.md".to_string()];
        let session =
            log_session(&tasks, &sessions(&ctx, dir.path()), " Tagged v1.2 ", Some("task-1"), &files)
                .unwrap();
        assert_eq!(session.task_id.as_deref(), Some("TASK-1"));
        assert_eq!(session.summary, "Tagged v1.2");
        assert_eq!(session.files_touched, files);
        assert_eq!(session.id.len(), 8);
    }

    #[test]
    fn falls_back_to_the_focused_task() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = seeded(dir.path(), &["Ship release", "Write changelog"]);
        let tasks = TaskStore::new(&ctx, dir.path());
        let store = sessions(&ctx, dir.path());

        let unfocused = log_session(&tasks, &store, "Looked around", None, &[]).unwrap();
        assert_eq!(unfocused.task_id, None);

        update::activate(&ctx, dir.path(), "TASK-2").unwrap();
        let focused = log_session(&tasks, &store, "Drafted notes", None, &[]).unwrap();
        assert_eq!(focused.task_id.as_deref(), Some("TASK-2"));
    }

    #[test]
    fn rejects_unknown_task_and_empty_summary() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = seeded(dir.path(), &[]);
        let tasks = TaskStore::new(&ctx, dir.path());
        let store = sessions(&ctx, dir.path());

        assert_eq!(
            log_session(&tasks, &store, "x", Some("TASK-7"), &[]).unwrap_err(),
            "Task TASK-7 not found."
        );
        assert!(log_session(&tasks, &store, "   ", None, &[]).is_err());
        assert!(store.sessions_for_day(store.today()).unwrap().is_empty());
    }
}
