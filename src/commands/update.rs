//! `overseer done`, `activate` and `block` commands.
//!
//! `activate` also makes the task the focused one (`active_task_id` in the
//! config), which `log` falls back to. Finishing or blocking the focused task
//! clears the focus.

use std::path::Path;

use crate::context::ServiceContext;
use crate::store::TaskStore;
use crate::task::{Task, TaskPatch, TaskStatus};

/// Execute the `done` command.
///
/// # Errors
///
/// Returns an error string if the task does not exist or the store fails.
pub fn done(ctx: &ServiceContext, root: &Path, id: &str) -> Result<(), String> {
    let task = apply(ctx, root, id, TaskPatch::status(TaskStatus::Done))?;
    unfocus(&TaskStore::new(ctx, root), &task.id)?;
    println!("Marked {} as done: {}", task.id, task.title);
    Ok(())
}

/// Execute the `activate` command.
///
/// # Errors
///
/// Returns an error string if the task does not exist or the store fails.
pub fn activate(ctx: &ServiceContext, root: &Path, id: &str) -> Result<(), String> {
    let task = apply(ctx, root, id, TaskPatch::status(TaskStatus::Active))?;
    focus(&TaskStore::new(ctx, root), &task.id)?;
    println!("Activated {}: {}", task.id, task.title);
    Ok(())
}

/// Execute the `block` command. A reason is appended to the task context.
///
/// # Errors
///
/// Returns an error string if the task does not exist or the store fails.
pub fn block(ctx: &ServiceContext, root: &Path, id: &str, reason: Option<&str>) -> Result<(), String> {
    let store = TaskStore::new(ctx, root);
    let mut patch = TaskPatch::status(TaskStatus::Blocked);
    if let Some(reason) = reason {
        let existing = store.get_task(id)?.and_then(|t| t.context);
        patch.context = Some(Some(blocked_context(existing.as_deref(), reason)));
    }
    let task = apply(ctx, root, id, patch)?;
    unfocus(&store, &task.id)?;
    println!("Marked {} as blocked: {}", task.id, task.title);
    Ok(())
}

fn apply(ctx: &ServiceContext, root: &Path, id: &str, patch: TaskPatch) -> Result<Task, String> {
    TaskStore::new(ctx, root)
        .update_task(id, patch)?
        .ok_or_else(|| format!("Task {id} not found."))
}

fn focus(store: &TaskStore<'_>, id: &str) -> Result<(), String> {
    let mut config = store.load_config()?;
    config.active_task_id = Some(id.to_string());
    store.save_config(&config)
}

/// Clears the focus if it is on `id`. The config is not rewritten otherwise.
fn unfocus(store: &TaskStore<'_>, id: &str) -> Result<(), String> {
    let mut config = store.load_config()?;
    if config.active_task_id.as_deref().is_some_and(|focused| focused.eq_ignore_ascii_case(id)) {
        config.active_task_id = None;
        store.save_config(&config)?;
    }
    Ok(())
}

fn blocked_context(existing: Option<&str>, reason: &str) -> String {
    match existing.filter(|c| !c.is_empty()) {
        Some(context) => format!("{context}\n\nBlocked: {reason}"),
        None => format!("Blocked: {reason}"),
    }
}
