//! Recording adapter for the `IssueTracker` port.

use serde::Serialize;

use super::{record_result, SharedRecorder};
use crate::ports::{IssueTracker, PortFuture, RemoteIssue};

/// Delegates to a live tracker and records each answer.
pub struct RecordingIssueTracker {
    inner: Box<dyn IssueTracker>,
    recorder: SharedRecorder,
}

impl RecordingIssueTracker {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn IssueTracker>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct IssueInput<'a> {
    key: &'a str,
}

#[derive(Serialize)]
struct TransitionInput<'a> {
    key: &'a str,
    status: &'a str,
}

impl IssueTracker for RecordingIssueTracker {
    fn issue<'a>(&'a self, key: &'a str) -> PortFuture<'a, RemoteIssue> {
        Box::pin(async move {
            let result = self.inner.issue(key).await;
            record_result(&self.recorder, "tracker", "issue", &IssueInput { key }, &result);
            result
        })
    }

    fn transition<'a>(&'a self, key: &'a str, status: &'a str) -> PortFuture<'a, ()> {
        Box::pin(async move {
            let result = self.inner.transition(key, status).await;
            let input = TransitionInput { key, status };
            record_result(&self.recorder, "tracker", "transition", &input, &result);
            result
        })
    }
}
