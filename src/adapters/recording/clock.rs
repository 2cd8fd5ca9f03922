//! Recording adapter for the `Clock` port.

use chrono::{DateTime, Utc};

use super::{record_value, SharedRecorder};
use crate::ports::Clock;

/// Captures every timestamp handed out by the inner clock.
pub struct RecordingClock {
    inner: Box<dyn Clock>,
    recorder: SharedRecorder,
}

impl RecordingClock {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn Clock>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl Clock for RecordingClock {
    fn now(&self) -> DateTime<Utc> {
        let now = self.inner.now();
        record_value(&self.recorder, "clock", "now", &(), &now);
        now
    }
}
