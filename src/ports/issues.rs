//! Remote issue search port used by the drift detector's fallback stage.

use serde::{Deserialize, Serialize};

use super::PortFuture;

/// Future returned by [`IssueSearch`] methods.
pub type SearchFuture<'a> = PortFuture<'a, Vec<RemoteIssue>>;

/// An issue as reported by the remote tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteIssue {
    /// Tracker key (e.g. `PROJ-123`).
    pub key: String,
    /// Issue title / summary.
    pub title: String,
    /// Tracker status name (e.g. "In Progress").
    pub status: String,
    /// Tracker issue type name (e.g. "Bug", "Story").
    pub issue_type: String,
    /// Assignee email, when assigned.
    #[serde(default)]
    pub assignee: Option<String>,
    /// Plain-text description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Searches a remote issue tracker by free text.
///
/// Implementations must be safe to call zero or more times. Transport
/// failures are reported as errors; callers decide whether to swallow them.
pub trait IssueSearch: Send + Sync {
    /// Searches for unresolved issues matching `query`, optionally limited to
    /// one project.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker cannot be reached or rejects the query.
    fn search<'a>(&'a self, query: &'a str, project: Option<&'a str>) -> SearchFuture<'a>;

    /// Lists unresolved issues assigned to the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker cannot be reached.
    fn assigned<'a>(&'a self, project: Option<&'a str>) -> SearchFuture<'a>;
}
