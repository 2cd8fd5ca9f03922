//! On-disk cassette layout (YAML).

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One call across a port boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Position in the recording, assigned by the recorder.
    pub seq: u64,
    /// Port name (`"issues"`, `"clock"`).
    pub port: String,
    /// Method invoked on the port.
    pub method: String,
    /// Call arguments.
    pub input: serde_json::Value,
    /// Return value. Fallible methods use `{"Ok": ..}` / `{"Err": "msg"}`.
    pub output: serde_json::Value,
}

/// A recorded session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Free-form label.
    pub name: String,
    /// When the recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Version of `overseer` that made the recording.
    #[serde(default)]
    pub version: String,
    /// Interactions in call order.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Reads and parses a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid cassette.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette {}: {e}", path.display()))
    }

    /// Returns `true` if any interaction was recorded for `port`.
    #[must_use]
    pub fn has_port(&self, port: &str) -> bool {
        self.interactions.iter().any(|i| i.port == port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loads_hand_written_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search.cassette.yaml");
        std::fs::write(
            &path,
            r#"
name: remote-fallback
recorded_at: 2024-06-15T10:30:00Z
interactions:
  - seq: 0
    port: issues
    method: search
    input: { query: "login timeout", project: null }
    output:
      Ok: []
"#,
        )
        .unwrap();

        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.name, "remote-fallback");
        assert_eq!(cassette.version, "");
        assert_eq!(cassette.interactions[0].input["query"], json!("login timeout"));
        assert!(cassette.has_port("issues"));
        assert!(!cassette.has_port("clock"));
    }

    #[test]
    fn load_reports_path_on_error() {
        let err = Cassette::load(Path::new("/nonexistent/x.yaml")).unwrap_err();
        assert!(err.contains("/nonexistent/x.yaml"));
    }
}
