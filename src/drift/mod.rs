//! Scope-drift detection.
//!
//! A check runs a fixed pipeline over one prompt and a snapshot of candidate
//! tasks, stopping at the first stage that applies:
//!
//! 1. empty prompt
//! 2. explicit `TASK-<n>` reference
//! 3. informational query ("show me", "where is", ...)
//! 4. lexical scoring against each candidate
//!
//! When nothing matches, [`DriftDetector::check_with_remote`] can consult a
//! remote issue tracker before reporting drift.

mod detector;
mod lexical;
mod query;
mod reference;
mod remote;
mod result;
mod title;

pub use detector::DriftDetector;
pub use remote::{lookup, search_query, RemoteLookup, REMOTE_CONFIDENCE};
pub use result::{MatchResult, MatchStrength, Outcome, STRONG_THRESHOLD, WEAK_THRESHOLD};
