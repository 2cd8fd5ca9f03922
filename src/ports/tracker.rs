//! Remote issue tracker port used by `jira sync`.

use super::{PortFuture, RemoteIssue};

/// Reads and updates single issues on the remote tracker.
pub trait IssueTracker: Send + Sync {
    /// Fetches one issue by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue does not exist or the tracker cannot be
    /// reached.
    fn issue<'a>(&'a self, key: &'a str) -> PortFuture<'a, RemoteIssue>;

    /// Moves an issue through the workflow transition named `status`.
    ///
    /// # Errors
    ///
    /// Returns an error if no transition with that name is available or the
    /// request fails.
    fn transition<'a>(&'a self, key: &'a str, status: &'a str) -> PortFuture<'a, ()>;
}
