//! Jira Cloud REST client (API v3).

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value};

use super::{JiraError, JiraIssue};
use crate::config::JiraConfig;

const API_PATH: &str = "/rest/api/3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ISSUE_FIELDS: &str = "summary,status,issuetype,assignee,description";

/// Default page size for free-text searches.
pub const SEARCH_LIMIT: u32 = 10;
/// Default page size for the assigned-issues listing.
pub const ASSIGNED_LIMIT: u32 = 50;

/// Authenticated client for one Jira site.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: Client,
    base_url: String,
    email: String,
    api_token: String,
}

impl JiraClient {
    /// Creates a client for `url` (e.g. `https://company.atlassian.net`)
    /// using basic auth with an API token.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError::Http`] if the HTTP client cannot be built.
    pub fn new(url: &str, email: &str, api_token: &str) -> Result<Self, JiraError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: format!("{}{API_PATH}", url.trim_end_matches('/')),
            email: email.to_string(),
            api_token: api_token.to_string(),
        })
    }

    /// Creates a client from project configuration.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError::NotConfigured`] if url, email or token is missing.
    pub fn from_config(config: &JiraConfig) -> Result<Self, JiraError> {
        match (&config.url, &config.email, &config.api_token) {
            (Some(url), Some(email), Some(token))
                if !url.is_empty() && !email.is_empty() && !token.is_empty() =>
            {
                Self::new(url, email, token)
            }
            _ => Err(JiraError::NotConfigured),
        }
    }

    /// Searches unresolved issues by free text, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    pub async fn search_issues(
        &self,
        query: &str,
        project: Option<&str>,
        max_results: u32,
    ) -> Result<Vec<JiraIssue>, JiraError> {
        self.search(&search_jql(query, project), max_results).await
    }

    /// Lists unresolved issues assigned to the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    pub async fn get_assigned_issues(
        &self,
        project: Option<&str>,
        max_results: u32,
    ) -> Result<Vec<JiraIssue>, JiraError> {
        self.search(&assigned_jql(project), max_results).await
    }

    /// Fetches a single issue by key.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError::NotFound`] for unknown keys, or another error if
    /// the request fails.
    pub async fn get_issue(&self, key: &str) -> Result<JiraIssue, JiraError> {
        let data = self.get(&format!("/issue/{key}"), &[("fields", ISSUE_FIELDS.to_string())]).await?;
        JiraIssue::from_api_response(&data)
    }

    /// Moves an issue through the workflow transition named `name`
    /// (case-insensitive), e.g. "In Progress" or "Done".
    ///
    /// # Errors
    ///
    /// Returns [`JiraError::TransitionUnavailable`] if the issue's workflow
    /// offers no such transition, or another error if a request fails.
    pub async fn transition_issue(&self, key: &str, name: &str) -> Result<(), JiraError> {
        let endpoint = format!("/issue/{key}/transitions");
        let data = self.get(&endpoint, &[]).await?;
        let id = find_transition(&data, name).map_err(|available| {
            JiraError::TransitionUnavailable {
                name: name.to_string(),
                key: key.to_string(),
                available: available.join(", "),
            }
        })?;
        tracing::debug!(%key, %name, %id, "jira transition");
        self.post(&endpoint, &json!({ "transition": { "id": id } })).await?;
        Ok(())
    }

    async fn search(&self, jql: &str, max_results: u32) -> Result<Vec<JiraIssue>, JiraError> {
        tracing::debug!(%jql, max_results, "jira search");
        let data = self
            .get(
                "/search",
                &[
                    ("jql", jql.to_string()),
                    ("maxResults", max_results.to_string()),
                    ("fields", ISSUE_FIELDS.to_string()),
                ],
            )
            .await?;

        data.get("issues")
            .and_then(Value::as_array)
            .map(|issues| issues.iter().map(JiraIssue::from_api_response).collect())
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value, JiraError> {
        let request = self.http.get(format!("{}{endpoint}", self.base_url)).query(params);
        self.send(request, endpoint).await
    }

    async fn post(&self, endpoint: &str, body: &Value) -> Result<Value, JiraError> {
        let request = self.http.post(format!("{}{endpoint}", self.base_url)).json(body);
        self.send(request, endpoint).await
    }

    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Value, JiraError> {
        let response = request
            .basic_auth(&self.email, Some(&self.api_token))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        check_status(status, endpoint, &body)?;

        if body.trim().is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        serde_json::from_str(&body).map_err(|e| JiraError::Decode(e.to_string()))
    }
}

/// Maps an HTTP status onto the client's error variants.
fn check_status(status: StatusCode, endpoint: &str, body: &str) -> Result<(), JiraError> {
    match status {
        StatusCode::UNAUTHORIZED => Err(JiraError::Authentication),
        StatusCode::NOT_FOUND => Err(JiraError::NotFound(endpoint.to_string())),
        s if s.as_u16() >= 400 => Err(JiraError::Api { status: s.as_u16(), body: body.to_string() }),
        _ => Ok(()),
    }
}

/// Finds the id of the transition named `name` in a `/transitions`
/// response. On a miss, returns the names that are available.
fn find_transition(data: &Value, name: &str) -> Result<String, Vec<String>> {
    let transitions = data.get("transitions").and_then(Value::as_array).map_or(&[][..], Vec::as_slice);
    let name_of = |t: &Value| t.get("name").and_then(Value::as_str).unwrap_or_default().to_string();

    transitions
        .iter()
        .find(|t| name_of(t).to_lowercase() == name.to_lowercase())
        .and_then(|t| match t.get("id") {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        })
        .ok_or_else(|| transitions.iter().map(name_of).collect())
}

/// JQL for a free-text search over unresolved issues.
pub(crate) fn search_jql(query: &str, project: Option<&str>) -> String {
    let escaped = query.replace('"', "\\\"");
    let mut jql = format!("text ~ \"{escaped}\" AND resolution = Unresolved");
    push_project_and_order(&mut jql, project);
    jql
}

/// JQL for unresolved issues assigned to the caller.
pub(crate) fn assigned_jql(project: Option<&str>) -> String {
    let mut jql = "assignee = currentUser() AND resolution = Unresolved".to_string();
    push_project_and_order(&mut jql, project);
    jql
}

fn push_project_and_order(jql: &mut String, project: Option<&str>) {
    if let Some(project) = project.filter(|p| !p.is_empty()) {
        jql.push_str(" AND project = ");
        jql.push_str(project);
    }
    jql.push_str(" ORDER BY updated DESC");
}
