use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Length of the short id shown to users.
pub const SESSION_ID_LEN: usize = 8;

/// A logged stretch of work, optionally tied to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSession {
    /// Short random id.
    pub id: String,
    /// What was done.
    pub summary: String,
    /// When the session was logged.
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub logged_at: DateTime<Utc>,
    /// Files touched during the session.
    #[serde(default)]
    pub files_touched: Vec<String>,
    /// Task the work belongs to.
    #[serde(default)]
    pub task_id: Option<String>,
}

impl WorkSession {
    /// `[HH:MM] summary (TASK-n)` in `tz`, with touched files on a second line.
    #[must_use]
    pub fn format_display<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let mut out =
            format!("[{}] {}", self.logged_at.with_timezone(tz).format("%H:%M"), self.summary);
        if let Some(task_id) = &self.task_id {
            out.push_str(&format!(" ({task_id})"));
        }
        if !self.files_touched.is_empty() {
            out.push_str(&format!("\n         Files: {}", self.files_touched.join(", ")));
        }
        out
    }
}
