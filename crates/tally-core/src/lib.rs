//! tally core: the key-value store abstraction, its value model, and the shared
//! error surface.
//!
//! This crate carries no HTTP or server dependencies so the store can be
//! embedded or tested on its own.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `TallyError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod store;
pub mod value;

/// Shared result type.
pub use error::{ClientCode, Result, TallyError};
pub use store::{KvStore, MemoryStore};
pub use value::Value;
