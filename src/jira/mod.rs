//! Jira integration: REST client, issue model and error type.

mod client;
mod error;
mod models;

pub use client::{JiraClient, ASSIGNED_LIMIT, SEARCH_LIMIT};
pub use error::JiraError;
pub use models::{local_status, local_task_type, remote_status, JiraIssue};
