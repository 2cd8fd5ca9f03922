//! Project configuration stored in `.overseer/config.json`.
//!
//! Jira settings can be overridden from the environment (and a `.env` file in
//! the project root), so credentials need not be committed:
//!
//! | variable | field |
//! |---|---|
//! | `OVERSEER_JIRA_URL` | `jira.url` |
//! | `OVERSEER_JIRA_EMAIL` | `jira.email` |
//! | `OVERSEER_JIRA_API_TOKEN` | `jira.api_token` |
//! | `OVERSEER_JIRA_PROJECT` | `jira.project_key` |

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Current on-disk format version.
pub const CONFIG_VERSION: &str = "0.1";

/// Project-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverseerConfig {
    /// Format version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Task the user is currently focused on, if any.
    #[serde(default)]
    pub active_task_id: Option<String>,
    /// Jira connection settings.
    #[serde(default)]
    pub jira: JiraConfig,
}

fn default_version() -> String {
    CONFIG_VERSION.to_string()
}

impl Default for OverseerConfig {
    fn default() -> Self {
        Self { version: default_version(), active_task_id: None, jira: JiraConfig::default() }
    }
}

/// Jira connection settings. All fields are optional on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraConfig {
    /// Site URL, e.g. `https://company.atlassian.net`.
    #[serde(default)]
    pub url: Option<String>,
    /// Account email used for basic auth.
    #[serde(default)]
    pub email: Option<String>,
    /// API token used for basic auth.
    #[serde(default)]
    pub api_token: Option<String>,
    /// Default project filter for searches.
    #[serde(default)]
    pub project_key: Option<String>,
}

impl JiraConfig {
    /// Returns `true` when url, email and token are all set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        [&self.url, &self.email, &self.api_token]
            .iter()
            .all(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
    }

    /// Overrides fields from `lookup` (normally the process environment).
    /// Empty values are ignored.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(url) = get("OVERSEER_JIRA_URL") {
            self.url = Some(url);
        }
        if let Some(email) = get("OVERSEER_JIRA_EMAIL") {
            self.email = Some(email);
        }
        if let Some(token) = get("OVERSEER_JIRA_API_TOKEN") {
            self.api_token = Some(token);
        }
        if let Some(project) = get("OVERSEER_JIRA_PROJECT") {
            self.project_key = Some(project);
        }
        self
    }

    /// Applies overrides from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }
}

/// Loads `<root>/.env` into the process environment if present.
///
/// Variables already set are not overwritten.
pub fn load_dotenv(root: &Path) {
    let path = root.join(".env");
    if path.exists() {
        if let Err(error) = dotenvy::from_path(&path) {
            tracing::warn!(path = %path.display(), %error, "failed to load .env");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_serializes_all_keys() {
        let value = serde_json::to_value(OverseerConfig::default()).unwrap();
        assert_eq!(value["version"], "0.1");
        assert!(value["active_task_id"].is_null());
        assert!(value["jira"]["url"].is_null());
        assert!(value["jira"].get("project_key").is_some());
    }

    #[test]
    fn parses_partial_file() {
        let config: OverseerConfig =
            serde_json::from_str(r#"{"jira": {"url": "https://x.atlassian.net"}}"#).unwrap();
        assert_eq!(config.version, "0.1");
        assert_eq!(config.jira.url.as_deref(), Some("https://x.atlassian.net"));
        assert!(!config.jira.is_configured());
    }

    #[test]
    fn ignores_unknown_keys() {
        let config: OverseerConfig =
            serde_json::from_str(r#"{"version": "0.1", "auto_log_sessions": true}"#).unwrap();
        assert_eq!(config, OverseerConfig::default());
    }

    #[test]
    fn is_configured_rejects_empty_strings() {
        let config = JiraConfig {
            url: Some("https://x.atlassian.net".into()),
            email: Some(String::new()),
            api_token: Some("t".into()),
            project_key: None,
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn overrides_replace_file_values() {
        let env: HashMap<&str, &str> = [
            ("OVERSEER_JIRA_URL", "https://env.atlassian.net"),
            ("OVERSEER_JIRA_EMAIL", "env@example.com"),
            ("OVERSEER_JIRA_API_TOKEN", "secret"),
            ("OVERSEER_JIRA_PROJECT", "  "),
        ]
        .into_iter()
        .collect();

        let file = JiraConfig {
            url: Some("https://file.atlassian.net".into()),
            project_key: Some("FILE".into()),
            ..JiraConfig::default()
        };
        let merged = file.with_overrides(|name| env.get(name).map(|v| (*v).to_string()));

        assert_eq!(merged.url.as_deref(), Some("https://env.atlassian.net"));
        assert_eq!(merged.email.as_deref(), Some("env@example.com"));
        assert_eq!(merged.project_key.as_deref(), Some("FILE"));
        assert!(merged.is_configured());
    }
}
