//! Replaying adapter for the `IssueSearch` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{BoxError, IssueSearch, RemoteIssue, SearchFuture};

/// Serves recorded search results; never touches the network.
pub struct ReplayingIssueSearch {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingIssueSearch {
    /// Creates a search backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn replay(&self, method: &str) -> Result<Vec<RemoteIssue>, BoxError> {
        replay_result(next_output(&self.replayer, "issues", method)?)
    }
}

impl IssueSearch for ReplayingIssueSearch {
    fn search<'a>(&'a self, _query: &'a str, _project: Option<&'a str>) -> SearchFuture<'a> {
        Box::pin(std::future::ready(self.replay("search")))
    }

    fn assigned<'a>(&'a self, _project: Option<&'a str>) -> SearchFuture<'a> {
        Box::pin(std::future::ready(self.replay("assigned")))
    }
}
