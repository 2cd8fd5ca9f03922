use chrono::{DateTime, Utc};

use crate::ports::Clock;

/// System wall clock.
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
