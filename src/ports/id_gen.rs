//! ID generator port for session identifiers.

/// Generates unique identifiers.
///
/// Replay substitutes the recorded sequence so logged sessions keep their ids.
pub trait IdGenerator: Send + Sync {
    /// Generates a new unique identifier string.
    fn generate_id(&self) -> String;
}
