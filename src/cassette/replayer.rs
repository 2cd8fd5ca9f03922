//! Serves recorded interactions back in order.

use std::collections::{HashMap, VecDeque};

use thiserror::Error;

use super::format::{Cassette, Interaction};

/// Replay mismatch between the code under test and the cassette.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplayError {
    /// The cassette never saw this port/method.
    #[error("cassette has no interactions for {port}::{method} (recorded: [{recorded}])")]
    Missing {
        /// Requested port.
        port: String,
        /// Requested method.
        method: String,
        /// Comma-separated `port::method` pairs present in the cassette.
        recorded: String,
    },
    /// Every recorded call for this port/method has been served.
    #[error("cassette exhausted: all {count} {port}::{method} interactions already replayed")]
    Exhausted {
        /// Requested port.
        port: String,
        /// Requested method.
        method: String,
        /// How many were recorded.
        count: usize,
    },
}

/// Replays a cassette with an independent queue per `port::method` pair, so
/// interleaving between ports need not match the recording.
#[derive(Debug)]
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
    served: HashMap<(String, String), usize>,
}

impl CassetteReplayer {
    /// Indexes a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues, served: HashMap::new() }
    }

    /// Takes the next recorded interaction for `port::method`.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] if nothing (more) was recorded for the pair.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<Interaction, ReplayError> {
        let key = (port.to_string(), method.to_string());
        let Some(queue) = self.queues.get_mut(&key) else {
            let mut recorded: Vec<String> =
                self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            recorded.sort();
            return Err(ReplayError::Missing {
                port: key.0,
                method: key.1,
                recorded: recorded.join(", "),
            });
        };

        match queue.pop_front() {
            Some(interaction) => {
                *self.served.entry(key).or_default() += 1;
                Ok(interaction)
            }
            None => {
                let count = self.served.get(&key).copied().unwrap_or_default();
                Err(ReplayError::Exhausted { port: key.0, method: key.1, count })
            }
        }
    }
}
