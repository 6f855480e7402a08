//! osinfo core: request telemetry primitives and the shared error type.
//!
//! This crate owns the request aggregator (counters, snapshots), the timing
//! hook that feeds it, and the report payloads the HTTP layer serializes. It
//! intentionally carries no transport or runtime dependencies so it can be
//! embedded in any serving stack.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Recording and snapshotting are total functions; collaborator failures
//! surface as `OsInfoError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod telemetry;

/// Shared result type.
pub use error::{OsInfoError, Result};
