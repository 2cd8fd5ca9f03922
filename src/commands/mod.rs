//! Command dispatch and handlers.

pub mod add;
pub mod check;
pub mod init;
pub mod jira;
pub mod log;
pub mod report;
pub mod standup;
pub mod tasks;
pub mod update;

use std::path::{Path, PathBuf};

use crate::cassette::config::CassetteMode;
use crate::cli::{Cli, Command, JiraCommand};
use crate::config::load_dotenv;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// When `OVERSEER_RECORD` is set, clock, id and Jira interactions are
/// recorded to that cassette; with `OVERSEER_REPLAY` they are served from it.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let root = project_root(cli.root.as_deref())?;
    load_dotenv(&root);

    let mode = CassetteMode::from_env()?;
    let mut ctx = ServiceContext::from_mode(&mode)?;
    tracing::debug!(root = %root.display(), ?mode, "dispatching");

    // The context writes any recording when it is dropped, even on error.
    dispatch_with_context(&cli.command, &mut ctx, &root)
}

/// Dispatch a command with the given service context.
fn dispatch_with_context(
    command: &Command,
    ctx: &mut ServiceContext,
    root: &Path,
) -> Result<(), String> {
    match command {
        Command::Init => init::run(ctx, root),
        Command::Tasks { status, all, verbose } => tasks::run(ctx, root, *status, *all, *verbose),
        Command::Add { title, task_type, status, context, files } => add::run(
            ctx,
            root,
            add::AddArgs {
                title,
                task_type: *task_type,
                status: *status,
                context: context.as_deref(),
                files,
            },
        ),
        Command::Done { id } => update::done(ctx, root, id),
        Command::Activate { id } => update::activate(ctx, root, id),
        Command::Block { id, reason } => update::block(ctx, root, id, reason.as_deref()),
        Command::Log { summary, task, files } => log::run(ctx, root, summary, task.as_deref(), files),
        Command::Report { today: _, yesterday, week } => {
            report::run(ctx, root, report::ReportPeriod::from_flags(*yesterday, *week))
        }
        Command::Standup { include_backlog } => standup::run(ctx, root, *include_backlog),
        Command::Check { prompt, remote, json } => check::run(ctx, root, prompt, *remote, *json),
        Command::Jira { command: JiraCommand::Pull { project, import } } => {
            jira::pull(ctx, root, project.as_deref(), *import)
        }
        Command::Jira { command: JiraCommand::Sync { id } } => jira::sync(ctx, root, id),
    }
}

/// `--root` / `OVERSEER_ROOT`, else the current directory.
fn project_root(root: Option<&Path>) -> Result<PathBuf, String> {
    match root {
        Some(root) => Ok(root.to_path_buf()),
        None => std::env::current_dir()
            .map_err(|e| format!("Failed to determine current directory: {e}")),
    }
}

/// Builds the single-threaded runtime used for remote calls.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use crate::context::ServiceContext;
    use crate::store::TaskStore;
    use crate::task::{NewTask, TaskStatus, TaskType};

    /// Initializes a store under `root` with one active task per title.
    pub fn seeded(root: &Path, active: &[&str]) -> ServiceContext {
        let ctx = ServiceContext::live();
        let store = TaskStore::new(&ctx, root);
        store.initialize().unwrap();
        for title in active {
            let mut task = NewTask::new(*title, TaskType::Feature);
            task.status = TaskStatus::Active;
            store.create_task(task).unwrap();
        }
        ctx
    }
}
