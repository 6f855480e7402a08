//! osinfo server library entry.
//!
//! This crate wires config, the request aggregator, the host probe, and the
//! HTTP routes into one axum application. It is intended to be consumed by
//! the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod host;
pub mod obs;
pub mod ops;
pub mod router;
