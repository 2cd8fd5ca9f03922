//! Selects record or replay mode from the environment.

use std::path::PathBuf;

/// Records live interactions to this cassette path.
pub const RECORD_ENV: &str = "OVERSEER_RECORD";
/// Replays interactions from this cassette path instead of calling out.
pub const REPLAY_ENV: &str = "OVERSEER_REPLAY";

/// How the service context wires its remote ports.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CassetteMode {
    /// Live adapters only.
    #[default]
    Off,
    /// Live adapters, with every call captured to the given path.
    Record(PathBuf),
    /// Recorded answers served from the given path.
    Replay(PathBuf),
}

impl CassetteMode {
    /// Reads the mode from `lookup` (normally the process environment).
    ///
    /// # Errors
    ///
    /// Returns an error if both record and replay are requested.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty()).map(PathBuf::from);
        match (get(RECORD_ENV), get(REPLAY_ENV)) {
            (Some(_), Some(_)) => {
                Err(format!("{RECORD_ENV} and {REPLAY_ENV} cannot both be set"))
            }
            (Some(path), None) => Ok(Self::Record(path)),
            (None, Some(path)) => Ok(Self::Replay(path)),
            (None, None) => Ok(Self::Off),
        }
    }

    /// Reads the mode from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if both record and replay are requested.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }
}
