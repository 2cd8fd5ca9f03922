//! Live `IssueSearch` backed by the Jira REST client.

use crate::jira::{JiraClient, ASSIGNED_LIMIT, SEARCH_LIMIT};
use crate::ports::{BoxError, IssueSearch, RemoteIssue, SearchFuture};

/// Searches Jira Cloud.
pub struct JiraIssueSearch {
    client: JiraClient,
}

impl JiraIssueSearch {
    /// Wraps a configured client.
    #[must_use]
    pub fn new(client: JiraClient) -> Self {
        Self { client }
    }
}

impl IssueSearch for JiraIssueSearch {
    fn search<'a>(&'a self, query: &'a str, project: Option<&'a str>) -> SearchFuture<'a> {
        Box::pin(async move {
            let issues = self.client.search_issues(query, project, SEARCH_LIMIT).await?;
            Ok::<Vec<RemoteIssue>, BoxError>(issues.into_iter().map(RemoteIssue::from).collect())
        })
    }

    fn assigned<'a>(&'a self, project: Option<&'a str>) -> SearchFuture<'a> {
        Box::pin(async move {
            let issues = self.client.get_assigned_issues(project, ASSIGNED_LIMIT).await?;
            Ok::<Vec<RemoteIssue>, BoxError>(issues.into_iter().map(RemoteIssue::from).collect())
        })
    }
}
