//! Key-value storage: the trait the server talks to and the in-memory backend.

mod memory;
mod traits;

pub use memory::MemoryStore;
pub use traits::{KvStore, UpdateFn};
