//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system (time, filesystem, id generation, the remote tracker).
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod issues;
pub mod tracker;

use std::future::Future;
use std::pin::Pin;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use id_gen::IdGenerator;
pub use issues::{IssueSearch, RemoteIssue, SearchFuture};
pub use tracker::IssueTracker;

/// Error type returned across port boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed future returned by the async ports, keeping them dyn-compatible.
pub type PortFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, BoxError>> + Send + 'a>>;
