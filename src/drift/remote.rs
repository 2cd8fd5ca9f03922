//! Remote issue-tracker fallback.
//!
//! Runs only when the local stages found nothing. Every outcome, including
//! transport failure, is an explicit [`RemoteLookup`] variant; the detector
//! collapses all but [`RemoteLookup::Found`] into "keep the local result".

use crate::ports::{IssueSearch, RemoteIssue};

/// Confidence assigned to a remote hit.
pub const REMOTE_CONFIDENCE: f64 = 0.6;
/// Fewer keywords than this carry too little signal to search.
const MIN_QUERY_KEYWORDS: usize = 2;
/// At most this many keywords go into the query.
const MAX_QUERY_KEYWORDS: usize = 5;

/// Outcome of one fallback attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteLookup {
    /// The tracker returned at least one issue; this is the first.
    Found(RemoteIssue),
    /// The search ran and returned nothing.
    Empty,
    /// The prompt had too few keywords to search.
    Skipped,
    /// The tracker could not be queried.
    Failed(String),
}

/// Builds the search query from the prompt's keywords, in prompt order.
///
/// Returns `None` when there are too few keywords.
#[must_use]
pub fn search_query(keywords: &[String]) -> Option<String> {
    if keywords.len() < MIN_QUERY_KEYWORDS {
        return None;
    }
    let take = keywords.len().min(MAX_QUERY_KEYWORDS);
    Some(keywords[..take].join(" "))
}

/// Queries the remote tracker for an issue related to the prompt keywords.
pub async fn lookup(
    search: &dyn IssueSearch,
    project: Option<&str>,
    keywords: &[String],
) -> RemoteLookup {
    let Some(query) = search_query(keywords) else {
        return RemoteLookup::Skipped;
    };

    tracing::debug!(%query, ?project, "searching remote tracker");
    match search.search(&query, project).await {
        Ok(issues) => issues.into_iter().next().map_or(RemoteLookup::Empty, RemoteLookup::Found),
        Err(e) => RemoteLookup::Failed(e.to_string()),
    }
}
