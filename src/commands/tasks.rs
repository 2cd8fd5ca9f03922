//! `overseer tasks` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::store::TaskStore;
use crate::task::{Task, TaskStatus};

/// Execute the `tasks` command.
///
/// Lists active tasks unless `status` or `all` says otherwise.
///
/// # Errors
///
/// Returns an error string if the store is missing or unreadable.
pub fn run(
    ctx: &ServiceContext,
    root: &Path,
    status: Option<TaskStatus>,
    all: bool,
    verbose: bool,
) -> Result<(), String> {
    let store = TaskStore::new(ctx, root);
    let filter = if all { None } else { Some(status.unwrap_or(TaskStatus::Active)) };
    let tasks = store.list_tasks(filter)?;
    print!("{}", render(&tasks, filter, verbose));
    Ok(())
}

fn render(tasks: &[Task], filter: Option<TaskStatus>, verbose: bool) -> String {
    if tasks.is_empty() {
        let label = filter.map_or("any", TaskStatus::as_str);
        return format!("No {label} tasks found.\n");
    }
    tasks.iter().map(|t| format!("{}\n\n", t.format_display(verbose))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::seeded;

    #[test]
    fn empty_listing_names_the_filter() {
        assert_eq!(render(&[], Some(TaskStatus::Done), false), "No done tasks found.\n");
        assert_eq!(render(&[], None, false), "No any tasks found.\n");
    }

    #[test]
    fn lists_active_tasks_with_blank_separator() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = seeded(dir.path(), &["Fix navbar", "Add search"]);
        let tasks = TaskStore::new(&ctx, dir.path()).list_tasks(Some(TaskStatus::Active)).unwrap();

        let out = render(&tasks, Some(TaskStatus::Active), false);
        assert_eq!(out, "[>] TASK-1: Fix navbar (feature)\n\n[>] TASK-2: Add search (feature)\n\n");
    }

    #[test]
    fn run_fails_without_init() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ServiceContext::live();
        let err = run(&ctx, dir.path(), None, false, false).unwrap_err();
        assert!(err.starts_with("Overseer not initialized"), "{err}");
    }
}
