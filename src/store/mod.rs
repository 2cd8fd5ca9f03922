//! Stores: persistence for tasks, work sessions and project config.
//!
//! All I/O goes through `ctx.fs`, so the stores work against any
//! `FileSystem` adapter. Layout under the project root:
//!
//! ```text
//! <root>/
//!   └── .overseer/
//!         ├── tasks.json    {"version": "0.1", "tasks": [...]}
//!         ├── config.json
//!         └── sessions/
//!               └── 2024-06-15.json    {"sessions": [...]}
//! ```
//!
//! Files are pretty-printed JSON with sorted keys and a trailing newline so
//! they diff cleanly under version control.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{OverseerConfig, CONFIG_VERSION};
use crate::context::ServiceContext;
use crate::task::{NewTask, Task, TaskPatch, TaskStatus};

mod sessions;
#[cfg(test)]
pub(crate) mod testing;

pub use sessions::{days_before, DaySessions, SessionStore};

/// Name of the per-project data directory.
pub const DATA_DIR: &str = ".overseer";
const TASKS_FILE: &str = "tasks.json";
const SESSIONS_DIR: &str = "sessions";
const CONFIG_FILE: &str = "config.json";
const ID_PREFIX: &str = "TASK-";

#[derive(Debug, Serialize, Deserialize)]
struct TasksFile {
    #[serde(default = "default_version")]
    version: String,
    #[serde(default)]
    tasks: Vec<Task>,
}

fn default_version() -> String {
    CONFIG_VERSION.to_string()
}

/// JSON-file task store rooted at a project directory.
pub struct TaskStore<'a> {
    ctx: &'a ServiceContext,
    root: PathBuf,
}

impl<'a> TaskStore<'a> {
    /// Creates a store for the project at `root`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, root: &Path) -> Self {
        Self { ctx, root: root.to_path_buf() }
    }

    /// The `.overseer/` directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    fn tasks_path(&self) -> PathBuf {
        self.data_dir().join(TASKS_FILE)
    }

    fn config_path(&self) -> PathBuf {
        self.data_dir().join(CONFIG_FILE)
    }

    /// Returns `true` if `.overseer/` exists.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.ctx.fs.exists(&self.data_dir())
    }

    /// Creates `.overseer/` with an empty task list, a sessions directory
    /// and default config. Existing files are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories or files cannot be written.
    pub fn initialize(&self) -> Result<(), String> {
        let dir = self.data_dir().join(SESSIONS_DIR);
        self.ctx
            .fs
            .create_dir_all(&dir)
            .map_err(|e| format!("Failed to create {}: {e}", dir.display()))?;

        if !self.ctx.fs.exists(&self.config_path()) {
            self.save_config(&OverseerConfig::default())?;
        }
        if !self.ctx.fs.exists(&self.tasks_path()) {
            self.save_tasks_file(&TasksFile { version: default_version(), tasks: Vec::new() })?;
        }
        Ok(())
    }

    /// Fails with a hint to run `overseer init` if the store is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if `.overseer/` does not exist.
    pub fn ensure_initialized(&self) -> Result<(), String> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(format!("Overseer not initialized. Run 'overseer init' in {}", self.root.display()))
        }
    }

    /// Lists tasks in file order, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is missing or the file is unreadable.
    pub fn list_tasks(&self, status: Option<TaskStatus>) -> Result<Vec<Task>, String> {
        let mut tasks = self.load_tasks_file()?.tasks;
        if let Some(status) = status {
            tasks.retain(|t| t.status == status);
        }
        Ok(tasks)
    }

    /// Looks up a task by id (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the store is missing or the file is unreadable.
    pub fn get_task(&self, id: &str) -> Result<Option<Task>, String> {
        Ok(self.load_tasks_file()?.tasks.into_iter().find(|t| t.id.eq_ignore_ascii_case(id)))
    }

    /// Finds the task linked to a remote issue key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is missing or the file is unreadable.
    pub fn find_by_external_key(&self, key: &str) -> Result<Option<Task>, String> {
        Ok(self
            .load_tasks_file()?
            .tasks
            .into_iter()
            .find(|t| t.external_key.as_deref() == Some(key)))
    }

    /// Creates a task with the next free id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn create_task(&self, new: NewTask) -> Result<Task, String> {
        let mut file = self.load_tasks_file()?;
        let now = self.ctx.clock.now();
        let task = Task {
            id: next_task_id(&file.tasks)?,
            title: new.title,
            status: new.status,
            task_type: new.task_type,
            created_by: new.created_by,
            context: new.context,
            linked_files: new.linked_files,
            external_key: new.external_key,
            created_at: now,
            updated_at: now,
        };
        file.tasks.push(task.clone());
        self.save_tasks_file(&file)?;
        tracing::debug!(id = %task.id, "task created");
        Ok(task)
    }

    /// Applies `patch` to the task with `id`. Returns `None` if no such task.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn update_task(&self, id: &str, patch: TaskPatch) -> Result<Option<Task>, String> {
        let mut file = self.load_tasks_file()?;
        let Some(task) = file.tasks.iter_mut().find(|t| t.id.eq_ignore_ascii_case(id)) else {
            return Ok(None);
        };
        patch.apply(task, self.ctx.clock.now());
        let updated = task.clone();
        self.save_tasks_file(&file)?;
        tracing::debug!(id = %updated.id, status = %updated.status, "task updated");
        Ok(Some(updated))
    }

    /// Removes a task. Returns `false` if no such task.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn delete_task(&self, id: &str) -> Result<bool, String> {
        let mut file = self.load_tasks_file()?;
        let before = file.tasks.len();
        file.tasks.retain(|t| !t.id.eq_ignore_ascii_case(id));
        if file.tasks.len() == before {
            return Ok(false);
        }
        self.save_tasks_file(&file)?;
        Ok(true)
    }

    /// Loads the project config. A missing config file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is missing or the file is malformed.
    pub fn load_config(&self) -> Result<OverseerConfig, String> {
        self.ensure_initialized()?;
        let path = self.config_path();
        if !self.ctx.fs.exists(&path) {
            return Ok(OverseerConfig::default());
        }
        let contents = self
            .ctx
            .fs
            .read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse {}: {e}", path.display()))
    }

    /// Writes the project config.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_config(&self, config: &OverseerConfig) -> Result<(), String> {
        self.write_json(&self.config_path(), config)
    }

    fn load_tasks_file(&self) -> Result<TasksFile, String> {
        self.ensure_initialized()?;
        let path = self.tasks_path();
        if !self.ctx.fs.exists(&path) {
            return Ok(TasksFile { version: default_version(), tasks: Vec::new() });
        }
        let contents = self
            .ctx
            .fs
            .read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse {}: {e}", path.display()))
    }

    fn save_tasks_file(&self, file: &TasksFile) -> Result<(), String> {
        self.write_json(&self.tasks_path(), file)
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), String> {
        let json = to_sorted_json(value)
            .map_err(|e| format!("Failed to serialize {}: {e}", path.display()))?;
        self.ctx
            .fs
            .write(path, &json)
            .map_err(|e| format!("Failed to write {}: {e}", path.display()))
    }
}

/// Pretty JSON with object keys sorted and a trailing newline.
fn to_sorted_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    // serde_json::Map is ordered by key, so a round-trip through Value sorts.
    let value = serde_json::to_value(value)?;
    let mut json = serde_json::to_string_pretty(&value)?;
    json.push('\n');
    Ok(json)
}

/// `TASK-<n>` with `n` one past the highest numeric id in use.
fn next_task_id(tasks: &[Task]) -> Result<String, String> {
    let max = tasks
        .iter()
        .filter_map(|t| t.id.strip_prefix(ID_PREFIX))
        .filter_map(|n| n.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    let next = max
        .checked_add(1)
        .ok_or_else(|| format!("No task ids left after {ID_PREFIX}{max}"))?;
    Ok(format!("{ID_PREFIX}{next}"))
}
