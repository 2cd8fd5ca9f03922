//! Record/replay of port interactions.
//!
//! A cassette is a YAML list of calls made across a port boundary. Recording
//! adapters append to a [`recorder::CassetteRecorder`]; replaying adapters
//! pull answers from a [`replayer::CassetteReplayer`], which lets the remote
//! fallback and `jira pull` run in tests without a network.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
