//! tally server library entry.
//!
//! This crate wires config, the in-memory store, the counter service, and the
//! HTTP transport into a runnable server. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod counter;
pub mod ops;
pub mod router;
pub mod transport;
