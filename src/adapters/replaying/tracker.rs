//! Replaying adapter for the `IssueTracker` port.

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{BoxError, IssueTracker, PortFuture, RemoteIssue};

/// Serves recorded issue lookups and transitions; never touches the network.
pub struct ReplayingIssueTracker {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingIssueTracker {
    /// Creates a tracker backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn replay<T: DeserializeOwned>(&self, method: &str) -> Result<T, BoxError> {
        replay_result(next_output(&self.replayer, "tracker", method)?)
    }
}

impl IssueTracker for ReplayingIssueTracker {
    fn issue<'a>(&'a self, _key: &'a str) -> PortFuture<'a, RemoteIssue> {
        Box::pin(std::future::ready(self.replay("issue")))
    }

    fn transition<'a>(&'a self, _key: &'a str, _status: &'a str) -> PortFuture<'a, ()> {
        Box::pin(std::future::ready(self.replay("transition")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    #[tokio::test]
    async fn missing_transition_is_an_error() {
        let cassette = Cassette {
            name: "t".into(),
            recorded_at: Utc::now(),
            version: String::new(),
            interactions: vec![Interaction {
                seq: 0,
                port: "tracker".into(),
                method: "transition".into(),
                input: json!({"key": "OPS-1", "status": "Done"}),
                output: json!({"Ok": null}),
            }],
        };
        let tracker = ReplayingIssueTracker::new(CassetteReplayer::new(&cassette));

        tracker.transition("OPS-1", "Done").await.unwrap();
        assert!(tracker.transition("OPS-1", "Done").await.is_err());
        assert!(tracker.issue("OPS-1").await.is_err());
    }
}
