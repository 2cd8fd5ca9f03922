//! Recording adapter for the `IssueSearch` port.

use serde::Serialize;

use super::{record_result, SharedRecorder};
use crate::ports::{IssueSearch, SearchFuture};

/// Delegates to a live search and records each answer.
pub struct RecordingIssueSearch {
    inner: Box<dyn IssueSearch>,
    recorder: SharedRecorder,
}

impl RecordingIssueSearch {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn IssueSearch>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct SearchInput<'a> {
    query: &'a str,
    project: Option<&'a str>,
}

#[derive(Serialize)]
struct AssignedInput<'a> {
    project: Option<&'a str>,
}

impl IssueSearch for RecordingIssueSearch {
    fn search<'a>(&'a self, query: &'a str, project: Option<&'a str>) -> SearchFuture<'a> {
        Box::pin(async move {
            let result = self.inner.search(query, project).await;
            record_result(&self.recorder, "issues", "search", &SearchInput { query, project }, &result);
            result
        })
    }

    fn assigned<'a>(&'a self, project: Option<&'a str>) -> SearchFuture<'a> {
        Box::pin(async move {
            let result = self.inner.assigned(project).await;
            record_result(&self.recorder, "issues", "assigned", &AssignedInput { project }, &result);
            result
        })
    }
}
