//! Port implementations.
//!
//! - `live`: real clock, disk and Jira.
//! - `recording`: wraps a live adapter and captures each call to a cassette.
//! - `replaying`: answers from a cassette without side effects.

pub mod live;
pub mod recording;
pub mod replaying;
