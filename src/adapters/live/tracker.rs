//! Live `IssueTracker` backed by the Jira REST client.

use crate::jira::JiraClient;
use crate::ports::{BoxError, IssueTracker, PortFuture, RemoteIssue};

/// Reads and transitions Jira Cloud issues.
pub struct JiraIssueTracker {
    client: JiraClient,
}

impl JiraIssueTracker {
    /// Wraps a configured client.
    #[must_use]
    pub fn new(client: JiraClient) -> Self {
        Self { client }
    }
}

impl IssueTracker for JiraIssueTracker {
    fn issue<'a>(&'a self, key: &'a str) -> PortFuture<'a, RemoteIssue> {
        Box::pin(async move {
            let issue = self.client.get_issue(key).await?;
            Ok::<RemoteIssue, BoxError>(issue.into())
        })
    }

    fn transition<'a>(&'a self, key: &'a str, status: &'a str) -> PortFuture<'a, ()> {
        Box::pin(async move {
            self.client.transition_issue(key, status).await?;
            Ok::<(), BoxError>(())
        })
    }
}
