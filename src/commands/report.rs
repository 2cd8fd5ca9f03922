//! `overseer report` command.

use std::fmt::Display;
use std::path::Path;

use chrono::{NaiveDate, TimeZone};

use crate::context::ServiceContext;
use crate::store::{days_before, SessionStore};

/// Days covered by `report --week`, today included.
const WEEK_DAYS: u64 = 7;

/// Which sessions `report` summarizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportPeriod {
    /// Sessions logged today.
    #[default]
    Today,
    /// Sessions logged yesterday.
    Yesterday,
    /// The last seven days, oldest first.
    Week,
}

impl ReportPeriod {
    /// Picks the period from the mutually exclusive CLI flags.
    #[must_use]
    pub fn from_flags(yesterday: bool, week: bool) -> Self {
        match (yesterday, week) {
            (true, _) => Self::Yesterday,
            (_, true) => Self::Week,
            _ => Self::Today,
        }
    }
}

/// Execute the `report` command.
///
/// # Errors
///
/// Returns an error string if the session files cannot be read.
pub fn run(ctx: &ServiceContext, root: &Path, period: ReportPeriod) -> Result<(), String> {
    println!("{}", render(&SessionStore::new(ctx, root), period)?);
    Ok(())
}

fn render<Tz>(store: &SessionStore<'_, Tz>, period: ReportPeriod) -> Result<String, String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let today = store.today();
    match period {
        ReportPeriod::Today => daily(store, today),
        ReportPeriod::Yesterday => daily(store, days_before(today, 1)?),
        ReportPeriod::Week => weekly(store, today),
    }
}

fn daily<Tz>(store: &SessionStore<'_, Tz>, day: NaiveDate) -> Result<String, String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let sessions = store.sessions_for_day(day)?;
    if sessions.is_empty() {
        return Ok(format!("**{day}**: No sessions logged."));
    }
    let mut lines = vec![format!("**{day}**"), String::new()];
    lines.extend(sessions.iter().map(|s| format!("- {}", store.display(s))));
    Ok(lines.join("\n"))
}

fn weekly<Tz>(store: &SessionStore<'_, Tz>, today: NaiveDate) -> Result<String, String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let days = store.sessions_for_range(days_before(today, WEEK_DAYS - 1)?, today)?;
    if days.is_empty() {
        return Ok("No sessions logged this week.".to_string());
    }
    let mut lines = vec!["## Week Summary".to_string(), String::new()];
    for (day, sessions) in &days {
        lines.push(format!("### {day}"));
        lines.extend(sessions.iter().map(|s| format!("- {}", store.display(s))));
        lines.push(String::new());
    }
    Ok(lines.join("\n"))
}
