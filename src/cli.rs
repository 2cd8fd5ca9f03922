//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::task::{TaskStatus, TaskType};

/// Top-level CLI parser for `overseer`.
#[derive(Debug, Parser)]
#[command(name = "overseer", version, about = "Track tasks and catch scope drift")]
pub struct Cli {
    /// Project root containing `.overseer/` (defaults to the current directory).
    #[arg(long, global = true, env = "OVERSEER_ROOT")]
    pub root: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create `.overseer/` in the project root.
    Init,
    /// List tasks (active ones by default).
    Tasks {
        /// Only show tasks with this status.
        #[arg(long, short, conflicts_with = "all")]
        status: Option<TaskStatus>,
        /// Show tasks in every status.
        #[arg(long, short)]
        all: bool,
        /// Include task context.
        #[arg(long, short)]
        verbose: bool,
    },
    /// Create a task.
    Add {
        /// Task title.
        title: String,
        /// Kind of work.
        #[arg(long = "type", short = 't', default_value = "feature")]
        task_type: TaskType,
        /// Initial status.
        #[arg(long, short, default_value = "backlog")]
        status: TaskStatus,
        /// Free-text notes.
        #[arg(long, short)]
        context: Option<String>,
        /// File the task touches (repeatable).
        #[arg(long = "file", short = 'f')]
        files: Vec<String>,
    },
    /// Mark a task as done.
    Done {
        /// Task id, e.g. `TASK-3`.
        id: String,
    },
    /// Mark a task as active.
    Activate {
        /// Task id, e.g. `TASK-3`.
        id: String,
    },
    /// Mark a task as blocked.
    Block {
        /// Task id, e.g. `TASK-3`.
        id: String,
        /// Why the task is blocked; appended to its context.
        #[arg(long, short)]
        reason: Option<String>,
    },
    /// Log a work session.
    Log {
        /// What was done.
        summary: String,
        /// Task the work belongs to (defaults to the focused task).
        #[arg(long, short)]
        task: Option<String>,
        /// File touched during the session (repeatable).
        #[arg(long = "file", short = 'f')]
        files: Vec<String>,
    },
    /// Summarize logged sessions (today by default).
    Report {
        /// Today's sessions.
        #[arg(long, group = "period")]
        today: bool,
        /// Yesterday's sessions.
        #[arg(long, group = "period")]
        yesterday: bool,
        /// The last seven days.
        #[arg(long, group = "period")]
        week: bool,
    },
    /// Print a daily standup summary.
    Standup {
        /// Preview the top of the backlog.
        #[arg(long, short = 'b')]
        include_backlog: bool,
    },
    /// Check whether a prompt matches an active task.
    Check {
        /// The request to check.
        prompt: String,
        /// Fall back to a Jira search when nothing local matches.
        #[arg(long)]
        remote: bool,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Jira integration.
    Jira {
        /// Jira subcommand.
        #[command(subcommand)]
        command: JiraCommand,
    },
}

/// `overseer jira` subcommands.
#[derive(Debug, Subcommand)]
pub enum JiraCommand {
    /// List issues assigned to you, optionally importing them as tasks.
    Pull {
        /// Limit to one project (defaults to the configured project key).
        #[arg(long, short)]
        project: Option<String>,
        /// Create local tasks for issues not yet linked.
        #[arg(long, short)]
        import: bool,
    },
    /// Move a task's linked issue to the matching Jira status.
    Sync {
        /// Task id, e.g. `TASK-3`.
        id: String,
    },
}
