//! Outcome of a single drift check.

use std::fmt;

use serde::Serialize;

use crate::ports::RemoteIssue;
use crate::task::Task;

/// Scores above this are strong matches.
pub const STRONG_THRESHOLD: f64 = 0.8;
/// Scores at or above this (and not strong) are weak matches.
pub const WEAK_THRESHOLD: f64 = 0.4;

/// Title used when a suggestion cannot be derived from the prompt.
pub(crate) const FALLBACK_TITLE: &str = "New task";

/// How confident the detector is that a prompt belongs to known work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrength {
    /// Proceed without asking.
    Strong,
    /// Proceed, but mention the assumed task.
    Weak,
    /// Scope drift: ask the user before starting.
    None,
}

impl MatchStrength {
    /// Buckets a confidence score. `0.8` is weak, `0.4` is weak, anything
    /// below `0.4` is none.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > STRONG_THRESHOLD {
            Self::Strong
        } else if score >= WEAK_THRESHOLD {
            Self::Weak
        } else {
            Self::None
        }
    }

    /// Lowercase label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Weak => "weak",
            Self::None => "none",
        }
    }
}

impl fmt::Display for MatchStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single primary outcome of a check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome<'r> {
    /// The prompt belongs to this local task.
    Task(&'r Task),
    /// The prompt is a question, not a work request.
    Informational,
    /// The remote tracker has a related issue.
    Remote(&'r RemoteIssue),
    /// No known work matches; the prompt should become a new task.
    Suggestion {
        /// Proposed title for the new task.
        title: &'r str,
        /// Best-scoring local task, kept for reference even though it fell
        /// below the match threshold.
        closest: Option<&'r Task>,
    },
}

/// Result of checking one prompt against a task snapshot.
///
/// Built once by the detector and read through accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    matched_task: Option<&'a Task>,
    confidence: f64,
    #[serde(rename = "match_strength")]
    strength: MatchStrength,
    suggested_title: Option<String>,
    #[serde(rename = "match_reasons")]
    reasons: Vec<String>,
    remote_issue: Option<RemoteIssue>,
}

impl<'a> MatchResult<'a> {
    pub(crate) fn empty_request() -> Self {
        Self {
            matched_task: None,
            confidence: 0.0,
            strength: MatchStrength::None,
            suggested_title: Some("Empty request".to_string()),
            reasons: Vec::new(),
            remote_issue: None,
        }
    }

    pub(crate) fn explicit(task: &'a Task) -> Self {
        Self {
            matched_task: Some(task),
            confidence: 1.0,
            strength: MatchStrength::Strong,
            suggested_title: None,
            reasons: vec!["Explicit task reference".to_string()],
            remote_issue: None,
        }
    }

    pub(crate) fn unknown_reference(task_id: &str) -> Self {
        Self {
            matched_task: None,
            confidence: 0.0,
            strength: MatchStrength::None,
            suggested_title: Some(format!("Work on {task_id}")),
            reasons: vec![format!("Referenced {task_id} but not in active tasks")],
            remote_issue: None,
        }
    }

    pub(crate) fn informational() -> Self {
        Self {
            matched_task: None,
            confidence: 1.0,
            strength: MatchStrength::Strong,
            suggested_title: None,
            reasons: vec!["Informational query - not a task".to_string()],
            remote_issue: None,
        }
    }

    pub(crate) fn scored(task: &'a Task, score: f64, reasons: Vec<String>) -> Self {
        Self {
            matched_task: Some(task),
            confidence: score,
            strength: MatchStrength::from_score(score),
            suggested_title: None,
            reasons,
            remote_issue: None,
        }
    }

    pub(crate) fn drift(
        closest: Option<&'a Task>,
        score: f64,
        reasons: Vec<String>,
        suggested_title: String,
    ) -> Self {
        Self {
            matched_task: closest,
            confidence: score,
            strength: MatchStrength::None,
            suggested_title: Some(suggested_title),
            reasons,
            remote_issue: None,
        }
    }

    pub(crate) fn remote(issue: RemoteIssue, confidence: f64) -> Self {
        Self {
            matched_task: None,
            confidence,
            strength: MatchStrength::from_score(confidence),
            suggested_title: None,
            reasons: vec![format!("Remote issue match: {}", issue.key)],
            remote_issue: Some(issue),
        }
    }

    /// The matched task. On a drift result this is the closest candidate.
    #[must_use]
    pub fn matched_task(&self) -> Option<&'a Task> {
        self.matched_task
    }

    /// Confidence in `[0, 1]`.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Strength tier derived from the confidence.
    #[must_use]
    pub fn strength(&self) -> MatchStrength {
        self.strength
    }

    /// Proposed title for a new task when nothing matched.
    #[must_use]
    pub fn suggested_title(&self) -> Option<&str> {
        self.suggested_title.as_deref()
    }

    /// Short human-readable reasons, in the order the signals fired.
    #[must_use]
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Related remote issue found by the fallback search.
    #[must_use]
    pub fn remote_issue(&self) -> Option<&RemoteIssue> {
        self.remote_issue.as_ref()
    }

    /// Returns `true` when the prompt looks like untracked work.
    #[must_use]
    pub fn is_drift(&self) -> bool {
        self.strength == MatchStrength::None
    }

    /// The primary outcome of this result.
    #[must_use]
    pub fn outcome(&self) -> Outcome<'_> {
        if let Some(issue) = &self.remote_issue {
            return Outcome::Remote(issue);
        }
        match (self.strength, self.matched_task) {
            (MatchStrength::None, closest) => Outcome::Suggestion {
                title: self.suggested_title.as_deref().unwrap_or(FALLBACK_TITLE),
                closest,
            },
            (_, Some(task)) => Outcome::Task(task),
            (_, None) => Outcome::Informational,
        }
    }
}
