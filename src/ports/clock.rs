//! Clock port for task timestamps.

use chrono::{DateTime, Utc};

/// Provides the current time for `created_at` / `updated_at` stamps.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
