//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::{
    JiraIssueSearch, JiraIssueTracker, LiveClock, LiveFileSystem, LiveIdGenerator,
};
use crate::adapters::recording::{
    RecordingClock, RecordingIdGenerator, RecordingIssueSearch, RecordingIssueTracker,
    SharedRecorder,
};
use crate::adapters::replaying::{
    ReplayingClock, ReplayingIdGenerator, ReplayingIssueSearch, ReplayingIssueTracker,
};
use crate::cassette::config::CassetteMode;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::JiraConfig;
use crate::jira::JiraClient;
use crate::ports::{Clock, FileSystem, IdGenerator, IssueSearch, IssueTracker};

/// Bundles the ports one command invocation needs.
///
/// The filesystem is always live so the task store reads and writes real
/// files. Clock, ids and the remote tracker follow the [`CassetteMode`].
pub struct ServiceContext {
    /// Clock for task and session timestamps.
    pub clock: Box<dyn Clock>,
    /// Filesystem for the `.overseer/` files.
    pub fs: Box<dyn FileSystem>,
    /// Session id source.
    pub ids: Box<dyn IdGenerator>,
    issues: Option<Box<dyn IssueSearch>>,
    tracker: Option<Box<dyn IssueTracker>>,
    replay: Option<Cassette>,
    recorder: Option<SharedRecorder>,
}

impl ServiceContext {
    /// Live clock, filesystem and ids; no remote tracker until
    /// [`connect_issues`](Self::connect_issues).
    #[must_use]
    pub fn live() -> Self {
        Self::from_parts(Box::new(LiveClock), Box::new(LiveFileSystem))
    }

    /// Live adapters with clock, id and remote tracker calls captured to
    /// `path` when the context is dropped.
    #[must_use]
    pub fn recording(path: &Path) -> Self {
        let recorder: SharedRecorder =
            Arc::new(Mutex::new(CassetteRecorder::new(path, "overseer-session")));
        Self {
            clock: Box::new(RecordingClock::new(Box::new(LiveClock), Arc::clone(&recorder))),
            fs: Box::new(LiveFileSystem),
            ids: Box::new(RecordingIdGenerator::new(Box::new(LiveIdGenerator), Arc::clone(&recorder))),
            issues: None,
            tracker: None,
            replay: None,
            recorder: Some(recorder),
        }
    }

    /// Clock, ids and remote tracker served from the cassette at `path`.
    ///
    /// Clock and ids are replayed only if the cassette recorded any.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        let clock: Box<dyn Clock> = if cassette.has_port("clock") {
            Box::new(ReplayingClock::new(CassetteReplayer::new(&cassette)))
        } else {
            Box::new(LiveClock)
        };
        let ids: Box<dyn IdGenerator> = if cassette.has_port("id_gen") {
            Box::new(ReplayingIdGenerator::new(CassetteReplayer::new(&cassette)))
        } else {
            Box::new(LiveIdGenerator)
        };
        Ok(Self {
            clock,
            fs: Box::new(LiveFileSystem),
            ids,
            issues: None,
            tracker: None,
            replay: Some(cassette),
            recorder: None,
        })
    }

    /// Builds the context for `mode`.
    ///
    /// # Errors
    ///
    /// Returns an error if a replay cassette cannot be loaded.
    pub fn from_mode(mode: &CassetteMode) -> Result<Self, String> {
        match mode {
            CassetteMode::Off => Ok(Self::live()),
            CassetteMode::Record(path) => Ok(Self::recording(path)),
            CassetteMode::Replay(path) => Self::replaying(path),
        }
    }

    /// Assembles a context from explicit adapters, with live ids.
    #[must_use]
    pub fn from_parts(clock: Box<dyn Clock>, fs: Box<dyn FileSystem>) -> Self {
        Self {
            clock,
            fs,
            ids: Box::new(LiveIdGenerator),
            issues: None,
            tracker: None,
            replay: None,
            recorder: None,
        }
    }

    /// Attaches the remote issue search and tracker.
    ///
    /// Replaying contexts always get both (from the cassette). Otherwise Jira
    /// adapters are attached only when `jira` is fully configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn connect_issues(&mut self, jira: &JiraConfig) -> Result<(), String> {
        if let Some(cassette) = &self.replay {
            self.issues = Some(Box::new(ReplayingIssueSearch::new(CassetteReplayer::new(cassette))));
            self.tracker = Some(Box::new(ReplayingIssueTracker::new(CassetteReplayer::new(cassette))));
            return Ok(());
        }
        if !jira.is_configured() {
            tracing::debug!("jira not configured; remote search disabled");
            return Ok(());
        }

        let client = JiraClient::from_config(jira).map_err(|e| e.to_string())?;
        let search: Box<dyn IssueSearch> = Box::new(JiraIssueSearch::new(client.clone()));
        let tracker: Box<dyn IssueTracker> = Box::new(JiraIssueTracker::new(client));
        match &self.recorder {
            Some(recorder) => {
                self.issues = Some(Box::new(RecordingIssueSearch::new(search, Arc::clone(recorder))));
                self.tracker =
                    Some(Box::new(RecordingIssueTracker::new(tracker, Arc::clone(recorder))));
            }
            None => {
                self.issues = Some(search);
                self.tracker = Some(tracker);
            }
        }
        Ok(())
    }

    /// Replaces the issue search.
    pub fn set_issues(&mut self, issues: Box<dyn IssueSearch>) {
        self.issues = Some(issues);
    }

    /// The attached issue search, if any.
    #[must_use]
    pub fn issues(&self) -> Option<&dyn IssueSearch> {
        self.issues.as_deref()
    }

    /// Replaces the issue tracker.
    pub fn set_tracker(&mut self, tracker: Box<dyn IssueTracker>) {
        self.tracker = Some(tracker);
    }

    /// The attached issue tracker, if any.
    #[must_use]
    pub fn tracker(&self) -> Option<&dyn IssueTracker> {
        self.tracker.as_deref()
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        let Some(recorder) = self.recorder.take() else {
            return;
        };
        let Ok(mut recorder) = recorder.lock() else {
            tracing::warn!("cassette recorder lock poisoned; recording lost");
            return;
        };
        match recorder.finish() {
            Ok(path) => tracing::debug!(path = %path.display(), "cassette written"),
            Err(error) => tracing::warn!(%error, "failed to write cassette"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use chrono::Utc;
    use serde_json::json;

    fn write_cassette(path: &Path, interactions: Vec<Interaction>) {
        let cassette =
            Cassette { name: "test".into(), recorded_at: Utc::now(), version: String::new(), interactions };
        std::fs::write(path, serde_yaml::to_string(&cassette).unwrap()).unwrap();
    }

    fn interaction(port: &str, method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq: 0, port: port.into(), method: method.into(), input: json!(null), output }
    }

    #[test]
    fn live_context_has_no_issue_search_without_jira() {
        let mut ctx = ServiceContext::live();
        ctx.connect_issues(&JiraConfig::default()).unwrap();
        assert!(ctx.issues().is_none());
        assert!(ctx.tracker().is_none());
    }

    #[test]
    fn configured_jira_attaches_search_and_tracker() {
        let jira = JiraConfig {
            url: Some("https://example.atlassian.net".into()),
            email: Some("dev@example.com".into()),
            api_token: Some("token".into()),
            project_key: None,
        };
        let mut ctx = ServiceContext::live();
        ctx.connect_issues(&jira).unwrap();
        assert!(ctx.issues().is_some());
        assert!(ctx.tracker().is_some());
    }

    #[tokio::test]
    async fn replaying_context_serves_clock_and_issues() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.cassette.yaml");
        write_cassette(
            &path,
            vec![
                interaction("clock", "now", json!("2024-06-15T10:30:00Z")),
                interaction("id_gen", "generate_id", json!("5e2a91c0-0000-4000-8000-000000000000")),
                interaction("issues", "search", json!({"Ok": []})),
                interaction("tracker", "transition", json!({"Ok": null})),
            ],
        );

        let mut ctx = ServiceContext::replaying(&path).unwrap();
        ctx.connect_issues(&JiraConfig::default()).unwrap();

        assert_eq!(ctx.clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
        assert!(ctx.ids.generate_id().starts_with("5e2a91c0"));
        let issues = ctx.issues().unwrap().search("a b", None).await.unwrap();
        assert!(issues.is_empty());
        ctx.tracker().unwrap().transition("OPS-1", "Done").await.unwrap();
    }

    #[test]
    fn replaying_without_clock_entries_uses_live_clock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issues-only.cassette.yaml");
        write_cassette(&path, vec![interaction("issues", "search", json!({"Ok": []}))]);

        let ctx = ServiceContext::replaying(&path).unwrap();
        let before = Utc::now();
        assert!(ctx.clock.now() >= before);
        assert_eq!(ctx.ids.generate_id().len(), 36);
    }

    #[test]
    fn recording_context_writes_cassette_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rec.cassette.yaml");

        {
            let ctx = ServiceContext::recording(&path);
            let _ = ctx.clock.now();
            let _ = ctx.ids.generate_id();
        }

        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[0].port, "clock");
        assert_eq!(cassette.interactions[1].port, "id_gen");
    }

    #[test]
    fn missing_replay_cassette_is_an_error() {
        let result = ServiceContext::from_mode(&CassetteMode::Replay("/nonexistent.yaml".into()));
        assert!(result.is_err());
    }
}
