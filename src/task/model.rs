//! Core task record type.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Currently being worked on. Active tasks are the drift candidates.
    Active,
    /// Accepted but not started.
    Backlog,
    /// Finished.
    Done,
    /// Waiting on something external.
    Blocked,
}

impl TaskStatus {
    /// Lowercase name used in JSON and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Backlog => "backlog",
            Self::Done => "done",
            Self::Blocked => "blocked",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Active => "[>]",
            Self::Backlog => "[ ]",
            Self::Done => "[x]",
            Self::Blocked => "[!]",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "backlog" => Ok(Self::Backlog),
            "done" => Ok(Self::Done),
            "blocked" => Ok(Self::Blocked),
            other => Err(format!("unknown task status: {other}")),
        }
    }
}

/// Kind of work a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// New user-facing capability.
    Feature,
    /// Defect fix.
    Bug,
    /// Technical debt.
    Debt,
    /// Maintenance chore.
    Chore,
}

impl TaskType {
    /// Lowercase name used in JSON and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Bug => "bug",
            Self::Debt => "debt",
            Self::Chore => "chore",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "feature" => Ok(Self::Feature),
            "bug" => Ok(Self::Bug),
            "debt" => Ok(Self::Debt),
            "chore" => Ok(Self::Chore),
            other => Err(format!("unknown task type: {other}")),
        }
    }
}

/// Who created a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Added by a person through the CLI.
    Human,
    /// Added by an agent or an importer.
    Agent,
}

/// A work item tracked by overseer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Stable identifier of the form `TASK-<n>`.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Current lifecycle state.
    pub status: TaskStatus,
    /// Kind of work.
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// Who created the task.
    pub created_by: Origin,
    /// Free-text notes; also scanned for keywords by the drift detector.
    #[serde(default)]
    pub context: Option<String>,
    /// Files the task is known to touch.
    #[serde(default)]
    pub linked_files: Vec<String>,
    /// Key of the linked issue in the remote tracker (e.g. `PROJ-12`).
    #[serde(default, rename = "jira_key", skip_serializing_if = "Option::is_none")]
    pub external_key: Option<String>,
    /// Creation time.
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Formats the task as a one-line summary, optionally followed by its
    /// context and linked files.
    #[must_use]
    pub fn format_display(&self, include_context: bool) -> String {
        let mut out = format!(
            "{} {}: {} ({})",
            self.status.icon(),
            self.id,
            self.title,
            self.task_type
        );
        if include_context {
            if let Some(context) = &self.context {
                out.push_str(&format!("\n    Context: {context}"));
            }
        }
        if !self.linked_files.is_empty() {
            out.push_str(&format!("\n    Files: {}", self.linked_files.join(", ")));
        }
        if let Some(key) = &self.external_key {
            out.push_str(&format!("\n    Jira: {key}"));
        }
        out
    }
}

/// Input for creating a task. The store assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    /// Title of the new task.
    pub title: String,
    /// Kind of work.
    pub task_type: TaskType,
    /// Initial status.
    pub status: TaskStatus,
    /// Who is creating it.
    pub created_by: Origin,
    /// Optional notes.
    pub context: Option<String>,
    /// Linked files.
    pub linked_files: Vec<String>,
    /// Linked remote issue key.
    pub external_key: Option<String>,
}

impl NewTask {
    /// A backlog task created by an agent, with no context or links.
    pub fn new(title: impl Into<String>, task_type: TaskType) -> Self {
        Self {
            title: title.into(),
            task_type,
            status: TaskStatus::Backlog,
            created_by: Origin::Agent,
            context: None,
            linked_files: Vec::new(),
            external_key: None,
        }
    }
}
