//! Recording adapters that capture interactions to a cassette.

pub mod clock;
pub mod id_gen;
pub mod issues;
pub mod tracker;

use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::{json, Value};

use crate::cassette::recorder::CassetteRecorder;

pub use clock::RecordingClock;
pub use id_gen::RecordingIdGenerator;
pub use issues::RecordingIssueSearch;
pub use tracker::RecordingIssueTracker;

/// Shared handle to the session's recorder.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| json!({ "unserializable": e.to_string() }))
}

fn push(recorder: &SharedRecorder, port: &str, method: &str, input: Value, output: Value) {
    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input, output),
        Err(_) => tracing::warn!(port, method, "cassette recorder lock poisoned; interaction dropped"),
    }
}

/// Records a call with an infallible return value.
pub(crate) fn record_value<I: Serialize, O: Serialize>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) {
    push(recorder, port, method, to_json(input), to_json(output));
}

/// Records a fallible call as `{"Ok": value}` or `{"Err": "message"}`, the
/// shape `replaying::replay_result` decodes.
pub(crate) fn record_result<I, T, E>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    I: Serialize,
    T: Serialize,
    E: std::fmt::Display,
{
    let output = match result {
        Ok(value) => json!({ "Ok": to_json(value) }),
        Err(e) => json!({ "Err": e.to_string() }),
    };
    push(recorder, port, method, to_json(input), output);
}
