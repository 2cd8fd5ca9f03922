//! Task and work-session records tracked by overseer.
//!
//! Defines the Rust types that mirror the JSON schema in
//! `.overseer/tasks.json` and `.overseer/sessions/`. The stores persist them
//! and the drift detector reads tasks as a borrowed snapshot.

mod model;
mod patch;
mod session;
pub mod timestamp;

pub use model::{NewTask, Origin, Task, TaskStatus, TaskType};
pub use patch::TaskPatch;
pub use session::{WorkSession, SESSION_ID_LEN};
