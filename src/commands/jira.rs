//! `overseer jira` commands.

use std::path::Path;

use crate::context::ServiceContext;
use crate::jira::{local_status, local_task_type, remote_status};
use crate::ports::{BoxError, IssueTracker, RemoteIssue};
use crate::store::TaskStore;
use crate::task::{NewTask, Origin};

const IMPORT_CONTEXT: &str = "Imported from Jira";
const NOT_CONFIGURED: &str = "Jira not configured. Set jira.url, jira.email and jira.api_token in \
                              .overseer/config.json or the OVERSEER_JIRA_* environment variables.";

/// Execute `jira pull`: list assigned issues and optionally import them.
///
/// Issues whose key is already linked to a local task are not imported again.
///
/// # Errors
///
/// Returns an error string if Jira is not configured, the request fails, or
/// the store cannot be written.
pub fn pull(
    ctx: &mut ServiceContext,
    root: &Path,
    project: Option<&str>,
    import: bool,
) -> Result<(), String> {
    let jira = TaskStore::new(ctx, root).load_config()?.jira.with_env_overrides();
    ctx.connect_issues(&jira)?;
    let Some(search) = ctx.issues() else {
        return Err(NOT_CONFIGURED.to_string());
    };

    let project = project.or(jira.project_key.as_deref());
    let issues = super::runtime()?
        .block_on(search.assigned(project))
        .map_err(|e| format!("Failed to fetch assigned issues: {e}"))?;
    tracing::debug!(count = issues.len(), ?project, "fetched assigned issues");

    if issues.is_empty() {
        println!("No assigned issues found.");
        return Ok(());
    }

    let store = TaskStore::new(ctx, root);
    println!("## Assigned Issues ({})\n", issues.len());
    for issue in &issues {
        println!("[{:12}] {}: {}", issue.status, issue.key, issue.title);
        if import {
            println!("             -> {}", import_issue(&store, issue)?);
        }
    }
    Ok(())
}

/// Execute `jira sync`: move the linked issue to the status matching the
/// local task. Issues already in that status are left alone.
///
/// # Errors
///
/// Returns an error string if Jira is not configured, the task is missing or
/// unlinked, or the tracker rejects the transition.
pub fn sync(ctx: &mut ServiceContext, root: &Path, id: &str) -> Result<(), String> {
    let jira = TaskStore::new(ctx, root).load_config()?.jira.with_env_overrides();
    ctx.connect_issues(&jira)?;
    let Some(tracker) = ctx.tracker() else {
        return Err(NOT_CONFIGURED.to_string());
    };

    let task = TaskStore::new(ctx, root)
        .get_task(id)?
        .ok_or_else(|| format!("Task {id} not found."))?;
    let Some(key) = task.external_key.as_deref() else {
        return Err(format!("Task {} has no linked Jira issue.", task.id));
    };

    let target = remote_status(task.status);
    let moved = super::runtime()?
        .block_on(push_status(tracker, key, target))
        .map_err(|e| format!("Sync failed: {e}"))?;
    if moved {
        println!("Synced {} -> {key}: status now '{target}'", task.id);
    } else {
        println!("Synced {} -> {key}: status already '{target}'", task.id);
    }
    Ok(())
}

/// Transitions `key` to `target` unless it is already there. Returns whether
/// the issue moved.
async fn push_status(tracker: &dyn IssueTracker, key: &str, target: &str) -> Result<bool, BoxError> {
    let issue = tracker.issue(key).await?;
    if issue.status.eq_ignore_ascii_case(target) {
        tracing::debug!(%key, status = %issue.status, "issue already in target status");
        return Ok(false);
    }
    tracker.transition(key, target).await?;
    Ok(true)
}

/// Creates a task for `issue` unless one is already linked. Returns the
/// line describing what happened.
fn import_issue(store: &TaskStore<'_>, issue: &RemoteIssue) -> Result<String, String> {
    if let Some(existing) = store.find_by_external_key(&issue.key)? {
        return Ok(format!("Already linked to {}", existing.id));
    }
    let mut new = NewTask::new(
        format!("[{}] {}", issue.key, issue.title),
        local_task_type(&issue.issue_type),
    );
    new.status = local_status(&issue.status);
    new.created_by = Origin::Agent;
    new.context = Some(IMPORT_CONTEXT.to_string());
    new.external_key = Some(issue.key.clone());
    let task = store.create_task(new)?;
    Ok(format!("Imported as {}", task.id))
}
