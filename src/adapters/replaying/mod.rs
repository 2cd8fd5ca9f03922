//! Replaying adapters that answer from a cassette.

pub mod clock;
pub mod id_gen;
pub mod issues;
pub mod tracker;

use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::BoxError;

pub use clock::ReplayingClock;
pub use id_gen::ReplayingIdGenerator;
pub use issues::ReplayingIssueSearch;
pub use tracker::ReplayingIssueTracker;

/// Pulls the next recorded output for `port::method`.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> Result<Value, BoxError> {
    let mut guard = replayer.lock().map_err(|_| "cassette replayer lock poisoned")?;
    Ok(guard.next_interaction(port, method)?.output)
}

/// Decodes a recorded `{"Ok": value}` / `{"Err": "message"}` output.
pub(crate) fn replay_result<T: DeserializeOwned>(output: Value) -> Result<T, BoxError> {
    match output {
        Value::Object(mut map) => {
            if let Some(ok) = map.remove("Ok") {
                return Ok(serde_json::from_value(ok)?);
            }
            if let Some(err) = map.remove("Err") {
                let message = err.as_str().map_or_else(|| err.to_string(), str::to_string);
                return Err(message.into());
            }
            Err("recorded output has neither Ok nor Err".into())
        }
        other => Err(format!("recorded output is not a result: {other}").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_ok_and_err() {
        let ok: Vec<u32> = replay_result(json!({"Ok": [1, 2]})).unwrap();
        assert_eq!(ok, vec![1, 2]);

        let err = replay_result::<Vec<u32>>(json!({"Err": "HTTP 503"})).unwrap_err();
        assert_eq!(err.to_string(), "HTTP 503");
    }

    #[test]
    fn rejects_untagged_output() {
        assert!(replay_result::<u32>(json!(3)).is_err());
        assert!(replay_result::<u32>(json!({"ok": 3})).is_err());
    }
}
