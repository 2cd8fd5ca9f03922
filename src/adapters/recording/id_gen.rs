//! Recording adapter for the `IdGenerator` port.

use super::{record_value, SharedRecorder};
use crate::ports::IdGenerator;

/// Captures every id handed out by the inner generator.
pub struct RecordingIdGenerator {
    inner: Box<dyn IdGenerator>,
    recorder: SharedRecorder,
}

impl RecordingIdGenerator {
    /// Wraps `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn IdGenerator>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl IdGenerator for RecordingIdGenerator {
    fn generate_id(&self) -> String {
        let id = self.inner.generate_id();
        record_value(&self.recorder, "id_gen", "generate_id", &(), &id);
        id
    }
}
