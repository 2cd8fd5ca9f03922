//! Jira issue representation and mapping onto local task enums.

use serde_json::Value;

use super::JiraError;
use crate::ports::RemoteIssue;
use crate::task::{TaskStatus, TaskType};

/// An issue as returned by the Jira REST API, flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraIssue {
    /// Issue key, e.g. `PROJ-123`.
    pub key: String,
    /// Issue summary (title).
    pub summary: String,
    /// Workflow status name, e.g. "In Progress".
    pub status: String,
    /// Issue type name, e.g. "Bug", "Story".
    pub issue_type: String,
    /// Assignee email.
    pub assignee: Option<String>,
    /// Plain-text description.
    pub description: Option<String>,
}

impl JiraIssue {
    /// Parses one entry of a search response, or a single-issue response.
    ///
    /// Only `key` is required; missing fields fall back to empty summary,
    /// status `"Unknown"` and type `"Task"`.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError::Decode`] if `key` is missing.
    pub fn from_api_response(data: &Value) -> Result<Self, JiraError> {
        let key = data
            .get("key")
            .and_then(Value::as_str)
            .ok_or_else(|| JiraError::Decode("issue without a key".to_string()))?;
        let fields = data.get("fields").unwrap_or(&Value::Null);

        let name_of = |field: &str| {
            fields.get(field).and_then(|f| f.get("name")).and_then(Value::as_str)
        };

        let description = match fields.get("description") {
            Some(Value::String(text)) => Some(text.clone()),
            Some(doc @ Value::Object(_)) => extract_adf_text(doc),
            _ => None,
        };

        Ok(Self {
            key: key.to_string(),
            summary: fields.get("summary").and_then(Value::as_str).unwrap_or_default().to_string(),
            status: name_of("status").unwrap_or("Unknown").to_string(),
            issue_type: name_of("issuetype").unwrap_or("Task").to_string(),
            assignee: fields
                .get("assignee")
                .and_then(|a| a.get("emailAddress"))
                .and_then(Value::as_str)
                .map(str::to_string),
            description,
        })
    }

    /// Maps the Jira issue type onto a local task type. Unknown types are features.
    #[must_use]
    pub fn to_local_task_type(&self) -> TaskType {
        local_task_type(&self.issue_type)
    }

    /// Maps the Jira workflow status onto a local status. Unknown statuses
    /// land in the backlog.
    #[must_use]
    pub fn to_local_status(&self) -> TaskStatus {
        local_status(&self.status)
    }
}

/// Maps a Jira issue type name onto a local task type.
#[must_use]
pub fn local_task_type(issue_type: &str) -> TaskType {
    match issue_type.to_lowercase().as_str() {
        "bug" => TaskType::Bug,
        "task" | "sub-task" => TaskType::Chore,
        "technical debt" => TaskType::Debt,
        _ => TaskType::Feature,
    }
}

/// Maps a Jira workflow status name onto a local status.
#[must_use]
pub fn local_status(status: &str) -> TaskStatus {
    match status.to_lowercase().as_str() {
        "done" | "resolved" | "closed" | "complete" => TaskStatus::Done,
        "blocked" | "on hold" | "impediment" => TaskStatus::Blocked,
        "in progress" | "in review" | "in development" => TaskStatus::Active,
        _ => TaskStatus::Backlog,
    }
}

/// The Jira workflow transition that moves an issue into `status`.
#[must_use]
pub fn remote_status(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Active => "In Progress",
        TaskStatus::Done => "Done",
        TaskStatus::Blocked => "Blocked",
        TaskStatus::Backlog => "To Do",
    }
}

impl From<JiraIssue> for RemoteIssue {
    fn from(issue: JiraIssue) -> Self {
        Self {
            key: issue.key,
            title: issue.summary,
            status: issue.status,
            issue_type: issue.issue_type,
            assignee: issue.assignee,
            description: issue.description,
        }
    }
}

/// Flattens an Atlassian Document Format body to plain text.
///
/// Only top-level paragraphs' text nodes are kept, joined by single spaces.
fn extract_adf_text(doc: &Value) -> Option<String> {
    if doc.get("type").and_then(Value::as_str) != Some("doc") {
        return None;
    }

    let texts: Vec<&str> = doc
        .get("content")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|block| block.get("type").and_then(Value::as_str) == Some("paragraph"))
        .filter_map(|block| block.get("content").and_then(Value::as_array))
        .flatten()
        .filter(|node| node.get("type").and_then(Value::as_str) == Some("text"))
        .map(|node| node.get("text").and_then(Value::as_str).unwrap_or_default())
        .collect();

    if texts.is_empty() {
        None
    } else {
        Some(texts.join(" "))
    }
}
