//! Replaying adapter for the `Clock` port.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::next_output;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::Clock;

/// Serves recorded timestamps in order.
pub struct ReplayingClock {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingClock {
    /// Creates a clock backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Clock for ReplayingClock {
    fn now(&self) -> DateTime<Utc> {
        // A cassette that runs out of timestamps does not match the code replaying it.
        let output = next_output(&self.replayer, "clock", "now")
            .unwrap_or_else(|e| panic!("clock replay failed: {e}"));
        serde_json::from_value(output)
            .unwrap_or_else(|e| panic!("clock replay failed: bad timestamp: {e}"))
    }
}
