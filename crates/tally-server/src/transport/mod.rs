//! Transport layer (HTTP).
//!
//! Turns requests into counter invocations and counter results into
//! responses. The store is never touched from here directly.

pub mod http;
