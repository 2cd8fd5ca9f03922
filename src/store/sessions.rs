//! Work-session log, one file per local day:
//! `.overseer/sessions/<YYYY-MM-DD>.json` holding `{"sessions": [...]}`.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::{TaskStore, DATA_DIR, SESSIONS_DIR};
use crate::context::ServiceContext;
use crate::task::{WorkSession, SESSION_ID_LEN};

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionsFile {
    #[serde(default)]
    sessions: Vec<WorkSession>,
}

/// Sessions logged on one day, in logging order.
pub type DaySessions = (NaiveDate, Vec<WorkSession>);

/// Session store rooted at a project directory.
///
/// Days are calendar days in `Tz`, the local timezone unless overridden with
/// [`in_timezone`](Self::in_timezone).
pub struct SessionStore<'a, Tz: TimeZone = Local> {
    ctx: &'a ServiceContext,
    root: PathBuf,
    tz: Tz,
}

impl<'a> SessionStore<'a> {
    /// Creates a store for the project at `root`, bucketing by local day.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, root: &Path) -> Self {
        Self { ctx, root: root.to_path_buf(), tz: Local }
    }
}

impl<'a, Tz> SessionStore<'a, Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// Buckets days and formats times in `tz` instead.
    #[must_use]
    pub fn in_timezone<T: TimeZone>(self, tz: T) -> SessionStore<'a, T> {
        SessionStore { ctx: self.ctx, root: self.root, tz }
    }

    /// The current day according to the context clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.day_of(self.ctx.clock.now())
    }

    /// The calendar day `at` falls on in the store's timezone.
    #[must_use]
    pub fn day_of(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.tz).date_naive()
    }

    /// One-line (or two-line, with files) rendering in the store's timezone.
    #[must_use]
    pub fn display(&self, session: &WorkSession) -> String {
        session.format_display(&self.tz)
    }

    fn tasks(&self) -> TaskStore<'a> {
        TaskStore::new(self.ctx, &self.root)
    }

    fn sessions_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR).join(SESSIONS_DIR)
    }

    fn day_path(&self, day: NaiveDate) -> PathBuf {
        self.sessions_dir().join(format!("{day}.json"))
    }

    /// Appends a session to today's file and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is missing or the file cannot be
    /// read or written.
    pub fn log_session(
        &self,
        summary: &str,
        task_id: Option<&str>,
        files_touched: &[String],
    ) -> Result<WorkSession, String> {
        let tasks = self.tasks();
        tasks.ensure_initialized()?;

        let session = WorkSession {
            id: self.ctx.ids.generate_id().chars().take(SESSION_ID_LEN).collect(),
            summary: summary.to_string(),
            logged_at: self.ctx.clock.now(),
            files_touched: files_touched.to_vec(),
            task_id: task_id.map(str::to_string),
        };
        let day = self.day_of(session.logged_at);

        let dir = self.sessions_dir();
        self.ctx
            .fs
            .create_dir_all(&dir)
            .map_err(|e| format!("Failed to create {}: {e}", dir.display()))?;
        let mut file = self.load_day(day)?;
        file.sessions.push(session.clone());
        tasks.write_json(&self.day_path(day), &file)?;
        tracing::debug!(id = %session.id, %day, "session logged");
        Ok(session)
    }

    /// Sessions logged on `day`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is missing or the day's file is
    /// unreadable.
    pub fn sessions_for_day(&self, day: NaiveDate) -> Result<Vec<WorkSession>, String> {
        self.tasks().ensure_initialized()?;
        Ok(self.load_day(day)?.sessions)
    }

    /// Days from `start` to `end` (inclusive) that have sessions, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is missing or a day's file is unreadable.
    pub fn sessions_for_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DaySessions>, String> {
        self.tasks().ensure_initialized()?;
        let mut days = Vec::new();
        for day in start.iter_days().take_while(|day| *day <= end) {
            let sessions = self.load_day(day)?.sessions;
            if !sessions.is_empty() {
                days.push((day, sessions));
            }
        }
        Ok(days)
    }

    fn load_day(&self, day: NaiveDate) -> Result<SessionsFile, String> {
        let path = self.day_path(day);
        if !self.ctx.fs.exists(&path) {
            return Ok(SessionsFile::default());
        }
        let contents = self
            .ctx
            .fs
            .read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse {}: {e}", path.display()))
    }
}

/// The day `days` before `day`.
///
/// # Errors
///
/// Returns an error if the result falls outside the supported calendar.
pub fn days_before(day: NaiveDate, days: u64) -> Result<NaiveDate, String> {
    day.checked_sub_days(Days::new(days))
        .ok_or_else(|| format!("No calendar day {days} days before {day}"))
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::super::testing::{test_context, test_context_at};
    use super::*;

    fn root() -> &'static Path {
        Path::new("/project")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn initialized(ctx: &ServiceContext) -> SessionStore<'_, Utc> {
        TaskStore::new(ctx, root()).initialize().unwrap();
        SessionStore::new(ctx, root()).in_timezone(Utc)
    }

    #[test]
    fn logging_requires_init() {
        let ctx = test_context();
        let store = SessionStore::new(&ctx, root()).in_timezone(Utc);
        assert!(store.log_session("x", None, &[]).unwrap_err().contains("overseer init"));
        assert!(store.sessions_for_day(date(2024, 6, 15)).is_err());
    }

    #[test]
    fn logs_into_the_days_file_with_short_ids() {
        let ctx = test_context();
        let store = initialized(&ctx);

        let first = store.log_session("Set up CI", None, &[]).unwrap();
        let second = store
            .log_session("Fixed flaky test", Some("TASK-2"), &["tests/api.rs".to_string()])
            .unwrap();

        assert_eq!(first.id, "00000001");
        assert_eq!(second.id, "00000002");
        assert_eq!(first.logged_at.to_rfc3339(), "2024-06-15T10:01:00+00:00");

        let raw = ctx.fs.read_to_string(Path::new("/project/.overseer/sessions/2024-06-15.json")).unwrap();
        assert!(raw.starts_with("{\n  \"sessions\": [\n"), "{raw}");
        assert!(raw.ends_with("}\n"));

        let sessions = store.sessions_for_day(date(2024, 6, 15)).unwrap();
        assert_eq!(sessions, vec![first, second]);
        assert!(store.sessions_for_day(date(2024, 6, 14)).unwrap().is_empty());
    }

    #[test]
    fn day_follows_the_timezone() {
        let start = Utc.with_ymd_and_hms(2024, 6, 15, 23, 30, 0).unwrap();
        let ctx = test_context_at(start);
        TaskStore::new(&ctx, root()).initialize().unwrap();
        let east = FixedOffset::east_opt(2 * 3600).unwrap();
        let store = SessionStore::new(&ctx, root()).in_timezone(east);

        let session = store.log_session("Late push", None, &[]).unwrap();
        assert_eq!(store.display(&session), "[01:31] Late push");
        assert_eq!(store.sessions_for_day(date(2024, 6, 16)).unwrap().len(), 1);
        assert_eq!(store.today(), date(2024, 6, 16));
    }

    #[test]
    fn range_skips_empty_days_and_is_inclusive() {
        let ctx = test_context();
        let store = initialized(&ctx);
        for day in ["2024-06-10", "2024-06-12"] {
            ctx.fs
                .write(
                    &PathBuf::from(format!("/project/.overseer/sessions/{day}.json")),
                    &format!(
                        r#"{{"sessions": [{{"id": "x", "summary": "on {day}",
                            "logged_at": "{day}T09:00:00+00:00"}}]}}"#
                    ),
                )
                .unwrap();
        }

        let days = store.sessions_for_range(date(2024, 6, 10), date(2024, 6, 12)).unwrap();
        let found: Vec<_> = days.iter().map(|(day, s)| (day.to_string(), s.len())).collect();
        assert_eq!(found, vec![("2024-06-10".to_string(), 1), ("2024-06-12".to_string(), 1)]);
        assert!(store.sessions_for_range(date(2024, 6, 11), date(2024, 6, 11)).unwrap().is_empty());
    }

    #[test]
    fn malformed_day_file_is_reported() {
        let ctx = test_context();
        let store = initialized(&ctx);
        ctx.fs.write(Path::new("/project/.overseer/sessions/2024-06-15.json"), "[").unwrap();
        let err = store.sessions_for_day(date(2024, 6, 15)).unwrap_err();
        assert!(err.starts_with("Failed to parse"), "{err}");
    }

    #[test]
    fn days_before_crosses_month_boundaries() {
        assert_eq!(days_before(date(2024, 3, 1), 1).unwrap(), date(2024, 2, 29));
        assert_eq!(days_before(date(2024, 6, 3), 6).unwrap(), date(2024, 5, 28));
        assert!(days_before(NaiveDate::MIN, 1).is_err());
    }
}
