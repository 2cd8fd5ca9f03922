//! Typed partial updates for tasks.

use chrono::{DateTime, Utc};

use super::model::{Task, TaskStatus, TaskType};

/// A partial update to a task. `None` leaves the field untouched.
///
/// Fields that are themselves optional on [`Task`] use a nested `Option`,
/// so `Some(None)` clears them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<String>,
    /// New status.
    pub status: Option<TaskStatus>,
    /// New task type.
    pub task_type: Option<TaskType>,
    /// New context, or `Some(None)` to clear it.
    pub context: Option<Option<String>>,
    /// Replacement set of linked files.
    pub linked_files: Option<Vec<String>>,
    /// New remote issue key, or `Some(None)` to unlink.
    pub external_key: Option<Option<String>>,
}

impl TaskPatch {
    /// Patch that only changes the status.
    #[must_use]
    pub fn status(status: TaskStatus) -> Self {
        Self { status: Some(status), ..Self::default() }
    }

    /// Returns `true` if applying this patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies every present field to `task` and stamps `updated_at`.
    pub fn apply(self, task: &mut Task, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(task_type) = self.task_type {
            task.task_type = task_type;
        }
        if let Some(context) = self.context {
            task.context = context;
        }
        if let Some(files) = self.linked_files {
            task.linked_files = files;
        }
        if let Some(key) = self.external_key {
            task.external_key = key;
        }
        task.updated_at = now;
    }
}
