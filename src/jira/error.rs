use thiserror::Error;

/// Errors returned by [`JiraClient`](super::JiraClient).
#[derive(Debug, Error)]
pub enum JiraError {
    /// The server rejected the credentials (HTTP 401).
    #[error("Jira authentication failed: invalid credentials")]
    Authentication,

    /// The requested resource does not exist (HTTP 404).
    #[error("Jira resource not found: {0}")]
    NotFound(String),

    /// Any other HTTP error status.
    #[error("Jira API error {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("Jira request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response was not the JSON shape we expect.
    #[error("malformed Jira response: {0}")]
    Decode(String),

    /// The issue's workflow has no transition with the requested name.
    #[error("Transition '{name}' not available for {key}. Available transitions: {available}")]
    TransitionUnavailable {
        /// Requested transition name.
        name: String,
        /// Issue key.
        key: String,
        /// Comma-separated names of the transitions that are available.
        available: String,
    },

    /// URL, email or API token is missing.
    #[error("Jira is not configured (url, email and api_token are required)")]
    NotConfigured,
}
