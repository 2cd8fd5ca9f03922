//! `overseer add` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::store::TaskStore;
use crate::task::{NewTask, Origin, TaskStatus, TaskType};

/// Arguments for [`run`].
#[derive(Debug)]
pub struct AddArgs<'a> {
    /// Task title.
    pub title: &'a str,
    /// Kind of work.
    pub task_type: TaskType,
    /// Initial status.
    pub status: TaskStatus,
    /// Optional notes.
    pub context: Option<&'a str>,
    /// Linked files.
    pub files: &'a [String],
}

/// Execute the `add` command.
///
/// # Errors
///
/// Returns an error string if the store is missing or cannot be written.
pub fn run(ctx: &ServiceContext, root: &Path, args: AddArgs<'_>) -> Result<(), String> {
    let store = TaskStore::new(ctx, root);
    let task = store.create_task(NewTask {
        title: args.title.to_string(),
        task_type: args.task_type,
        status: args.status,
        created_by: Origin::Human,
        context: args.context.map(str::to_string),
        linked_files: args.files.to_vec(),
        external_key: None,
    })?;
    println!("Created {}: {}", task.id, task.title);
    Ok(())
}
