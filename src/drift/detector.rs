//! The drift detector: decides whether a prompt belongs to tracked work.

use crate::ports::IssueSearch;
use crate::task::Task;

use super::lexical::{best_match, PromptSignals};
use super::remote::{lookup, RemoteLookup, REMOTE_CONFIDENCE};
use super::result::{MatchResult, MatchStrength, WEAK_THRESHOLD};
use super::{query, reference, title};

/// Compares prompts against a borrowed snapshot of candidate tasks.
///
/// The detector holds no mutable state; one instance can serve any number
/// of checks, concurrently if needed.
#[derive(Clone, Copy)]
pub struct DriftDetector<'a> {
    tasks: &'a [Task],
    remote: Option<&'a dyn IssueSearch>,
    project_key: Option<&'a str>,
}

impl<'a> DriftDetector<'a> {
    /// Creates a detector over the given candidates (usually the active tasks).
    #[must_use]
    pub fn new(tasks: &'a [Task]) -> Self {
        Self { tasks, remote: None, project_key: None }
    }

    /// Enables the remote fallback for [`check_with_remote`](Self::check_with_remote).
    #[must_use]
    pub fn with_remote(mut self, search: &'a dyn IssueSearch, project_key: Option<&'a str>) -> Self {
        self.remote = Some(search);
        self.project_key = project_key;
        self
    }

    /// Runs the local stages: explicit reference, informational query,
    /// lexical matching.
    #[must_use]
    pub fn check(&self, prompt: &str) -> MatchResult<'a> {
        if prompt.trim().is_empty() {
            return MatchResult::empty_request();
        }

        if let Some(result) = reference::resolve(prompt, self.tasks) {
            tracing::debug!(strength = %result.strength(), "explicit task reference");
            return result;
        }

        if let Some(pattern) = query::informational_pattern(prompt) {
            tracing::debug!(pattern, "informational query");
            return MatchResult::informational();
        }

        let signals = PromptSignals::new(prompt);
        match best_match(self.tasks, &signals) {
            Some((task, score)) if score.value >= WEAK_THRESHOLD => {
                tracing::debug!(task = %task.id, score = score.value, "lexical match");
                MatchResult::scored(task, score.value, score.reasons)
            }
            Some((task, score)) => {
                tracing::debug!(closest = %task.id, score = score.value, "no match above threshold");
                MatchResult::drift(Some(task), score.value, score.reasons, title::suggest_title(prompt))
            }
            None => {
                tracing::debug!(candidates = self.tasks.len(), "no candidate scored");
                MatchResult::drift(None, 0.0, Vec::new(), title::suggest_title(prompt))
            }
        }
    }

    /// Runs [`check`](Self::check) and, when it finds nothing and a remote
    /// search is configured, asks the remote tracker for a related issue.
    ///
    /// Remote failures never surface: the local result is returned unchanged.
    pub async fn check_with_remote(&self, prompt: &str) -> MatchResult<'a> {
        let local = self.check(prompt);
        if local.strength() != MatchStrength::None {
            return local;
        }
        let Some(search) = self.remote else {
            return local;
        };

        let keywords = PromptSignals::new(prompt).keywords().to_vec();
        match lookup(search, self.project_key, &keywords).await {
            RemoteLookup::Found(issue) => {
                tracing::debug!(key = %issue.key, "remote fallback match");
                MatchResult::remote(issue, REMOTE_CONFIDENCE)
            }
            RemoteLookup::Empty => {
                tracing::debug!("remote fallback found nothing");
                local
            }
            RemoteLookup::Skipped => {
                tracing::debug!("too few keywords for remote fallback");
                local
            }
            RemoteLookup::Failed(error) => {
                tracing::warn!(%error, "remote fallback failed; keeping local result");
                local
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drift::Outcome;
    use crate::task::{Origin, TaskStatus, TaskType};
    use chrono::Utc;

    fn make_task(id: &str, title: &str, task_type: TaskType) -> Task {
        let now = Utc::now();
        Task {
            id: id.into(),
            title: title.into(),
            status: TaskStatus::Active,
            task_type,
            created_by: Origin::Human,
            context: None,
            linked_files: vec![],
            external_key: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn explicit_reference_is_strong() {
        let tasks = vec![make_task("TASK-1", "Fix login bug", TaskType::Bug)];
        let result = DriftDetector::new(&tasks).check("Work on task-1");

        assert_eq!(result.matched_task().map(|t| t.id.as_str()), Some("TASK-1"));
        assert_eq!(result.strength(), MatchStrength::Strong);
        assert!((result.confidence() - 1.0).abs() < f64::EPSILON);
        assert_eq!(result.reasons(), ["Explicit task reference"]);
    }

    #[test]
    fn unknown_reference_suggests_work_on_id() {
        let tasks = vec![make_task("TASK-1", "Fix login bug", TaskType::Bug)];
        let result = DriftDetector::new(&tasks).check("Work on TASK-99");

        assert!(result.matched_task().is_none());
        assert_eq!(result.strength(), MatchStrength::None);
        assert_eq!(result.suggested_title(), Some("Work on TASK-99"));
        assert_eq!(result.reasons(), ["Referenced TASK-99 but not in active tasks"]);
    }

    #[test]
    fn reference_beats_informational_pattern() {
        let tasks = vec![make_task("TASK-2", "Billing", TaskType::Chore)];
        let result = DriftDetector::new(&tasks).check("What's the status of TASK-2?");
        assert_eq!(result.outcome(), Outcome::Task(&tasks[0]));
    }

    #[test]
    fn whitespace_prompt_is_empty_request() {
        let tasks = vec![make_task("TASK-1", "Fix bug", TaskType::Bug)];
        let result = DriftDetector::new(&tasks).check("  \n\t ");

        assert_eq!(result.suggested_title(), Some("Empty request"));
        assert!(result.reasons().is_empty());
        assert!(result.is_drift());
    }

    #[test]
    fn informational_query_is_strong_without_task() {
        let tasks = vec![make_task("TASK-1", "Fix navbar styling", TaskType::Bug)];
        let result = DriftDetector::new(&tasks).check("Show me the bug list");

        assert_eq!(result.outcome(), Outcome::Informational);
        assert_eq!(result.reasons(), ["Informational query - not a task"]);
    }

    #[test]
    fn below_threshold_keeps_closest_and_reasons() {
        let tasks = vec![make_task("TASK-1", "Fix navbar styling", TaskType::Chore)];
        let result = DriftDetector::new(&tasks).check("Restyle navbar icons and spacing rules");

        assert!(result.is_drift());
        assert_eq!(result.matched_task().map(|t| t.id.as_str()), Some("TASK-1"));
        assert_eq!(result.reasons(), ["Keywords: navbar"]);
        assert!(result.suggested_title().is_some());
    }

    #[test]
    fn weak_match_is_not_drift() {
        let tasks = vec![make_task("TASK-1", "Fix login timeout issue", TaskType::Bug)];
        let result = DriftDetector::new(&tasks).check("There's a bug with the login");

        assert_eq!(result.strength(), MatchStrength::Weak);
        assert_eq!(result.outcome(), Outcome::Task(&tasks[0]));
    }

    #[test]
    fn shared_keyword_and_feature_wording_reach_weak() {
        let tasks = vec![make_task("TASK-1", "Implement user authentication", TaskType::Feature)];
        let result = DriftDetector::new(&tasks).check("Add authentication to the API");

        // one of three prompt keywords (0.2) plus the feature bonus (0.2)
        assert_eq!(result.outcome(), Outcome::Task(&tasks[0]));
        assert_eq!(result.strength(), MatchStrength::Weak);
        assert!((result.confidence() - 0.4).abs() < 1e-9);
        assert_eq!(result.reasons(), ["Keywords: authentication", "Feature-related request"]);
    }

    #[test]
    fn linked_file_basename_is_a_weak_match() {
        let mut task = make_task("TASK-3", "Refresh site styles", TaskType::Chore);
        task.linked_files = vec!["src/components/nav.tsx".into(), "styles/global.css".into()];
        let tasks = vec![task];
        let result = DriftDetector::new(&tasks).check("Update the nav component colors");

        assert_eq!(result.outcome(), Outcome::Task(&tasks[0]));
        assert_eq!(result.strength(), MatchStrength::Weak);
        assert!((result.confidence() - 0.5).abs() < 1e-9);
        assert_eq!(result.reasons(), ["File reference: src/components/nav.tsx"]);
    }

    #[test]
    fn no_candidates_means_drift_with_title() {
        let result = DriftDetector::new(&[]).check("Please add a dark mode toggle");

        assert_eq!(result.outcome(), Outcome::Suggestion { title: "Add a dark mode toggle", closest: None });
        assert!(result.confidence().abs() < f64::EPSILON);
    }

    #[test]
    fn check_is_deterministic() {
        let tasks = vec![
            make_task("TASK-1", "Implement user authentication", TaskType::Feature),
            make_task("TASK-2", "Fix navbar styling", TaskType::Bug),
        ];
        let detector = DriftDetector::new(&tasks);
        let first = detector.check("Add authentication to the API");
        let second = detector.check("Add authentication to the API");
        assert_eq!(first, second);
    }

    mod remote {
        use super::*;
        use crate::ports::{BoxError, RemoteIssue, SearchFuture};
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Mutex;

        struct StubSearch {
            response: Result<Vec<RemoteIssue>, String>,
            calls: AtomicUsize,
            last_query: Mutex<Option<(String, Option<String>)>>,
        }

        impl StubSearch {
            fn returning(response: Result<Vec<RemoteIssue>, String>) -> Self {
                Self { response, calls: AtomicUsize::new(0), last_query: Mutex::new(None) }
            }

            fn calls(&self) -> usize {
                self.calls.load(Ordering::SeqCst)
            }
        }

        impl IssueSearch for StubSearch {
            fn search<'a>(&'a self, query: &'a str, project: Option<&'a str>) -> SearchFuture<'a> {
                Box::pin(async move {
                    self.calls.fetch_add(1, Ordering::SeqCst);
                    *self.last_query.lock().unwrap() =
                        Some((query.to_string(), project.map(str::to_string)));
                    self.response.clone().map_err(BoxError::from)
                })
            }

            fn assigned<'a>(&'a self, _project: Option<&'a str>) -> SearchFuture<'a> {
                Box::pin(async { Ok(Vec::new()) })
            }
        }

        fn issue(key: &str) -> RemoteIssue {
            RemoteIssue {
                key: key.into(),
                title: "Rotate deploy credentials".into(),
                status: "In Progress".into(),
                issue_type: "Task".into(),
                assignee: Some("Sam".into()),
                description: None,
            }
        }

        #[tokio::test]
        async fn found_issue_becomes_weak_remote_match() {
            let stub = StubSearch::returning(Ok(vec![issue("OPS-12"), issue("OPS-13")]));
            let result = DriftDetector::new(&[])
                .with_remote(&stub, Some("OPS"))
                .check_with_remote("Rotate the deploy credentials for staging")
                .await;

            assert_eq!(result.strength(), MatchStrength::Weak);
            assert!((result.confidence() - 0.6).abs() < f64::EPSILON);
            assert_eq!(result.remote_issue().map(|i| i.key.as_str()), Some("OPS-12"));
            assert_eq!(result.reasons(), ["Remote issue match: OPS-12"]);

            let (query, project) = stub.last_query.lock().unwrap().clone().unwrap();
            assert_eq!(query, "rotate deploy credentials staging");
            assert_eq!(project.as_deref(), Some("OPS"));
        }

        #[tokio::test]
        async fn empty_search_keeps_local_result() {
            let stub = StubSearch::returning(Ok(vec![]));
            let detector = DriftDetector::new(&[]).with_remote(&stub, None);
            let result = detector.check_with_remote("Rotate the deploy credentials").await;

            assert_eq!(result, detector.check("Rotate the deploy credentials"));
            assert_eq!(stub.calls(), 1);
        }

        #[tokio::test]
        async fn failing_search_keeps_local_result() {
            let stub = StubSearch::returning(Err("connection refused".into()));
            let detector = DriftDetector::new(&[]).with_remote(&stub, None);
            let result = detector.check_with_remote("Rotate the deploy credentials").await;

            assert!(result.is_drift());
            assert!(result.remote_issue().is_none());
            assert_eq!(result.suggested_title(), Some("Rotate the deploy credentials"));
        }

        #[tokio::test]
        async fn local_match_skips_remote() {
            let tasks = vec![make_task("TASK-1", "Fix login bug", TaskType::Bug)];
            let stub = StubSearch::returning(Ok(vec![issue("OPS-1")]));
            let result = DriftDetector::new(&tasks)
                .with_remote(&stub, None)
                .check_with_remote("Work on TASK-1")
                .await;

            assert_eq!(result.outcome(), Outcome::Task(&tasks[0]));
            assert_eq!(stub.calls(), 0);
        }

        #[tokio::test]
        async fn too_few_keywords_skips_remote() {
            let stub = StubSearch::returning(Ok(vec![issue("OPS-1")]));
            let result = DriftDetector::new(&[])
                .with_remote(&stub, None)
                .check_with_remote("refactor")
                .await;

            assert!(result.is_drift());
            assert_eq!(stub.calls(), 0);
        }

        #[tokio::test]
        async fn unknown_reference_still_consults_remote() {
            let stub = StubSearch::returning(Ok(vec![issue("OPS-4")]));
            let result = DriftDetector::new(&[])
                .with_remote(&stub, None)
                .check_with_remote("Continue TASK-9 credential rotation")
                .await;

            assert_eq!(result.remote_issue().map(|i| i.key.as_str()), Some("OPS-4"));
        }

        #[tokio::test]
        async fn without_remote_matches_local_check() {
            let detector = DriftDetector::new(&[]);
            let result = detector.check_with_remote("Rotate the deploy credentials").await;
            assert_eq!(result, detector.check("Rotate the deploy credentials"));
        }
    }
}
