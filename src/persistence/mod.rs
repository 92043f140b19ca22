//! Saving and restoring games.
//!
//! [`Snapshot`] captures the persistent engine state, [`codec`] turns it
//! into bytes and a [`SaveStore`] keeps those bytes in a single slot.
//! Loading is fail-soft at the engine boundary: `Engine::load_or_new`
//! treats any error as "no save available".

pub mod codec;
pub mod snapshot;
pub mod store;

pub use snapshot::{Snapshot, SNAPSHOT_VERSION};
pub use store::{FileStore, MemoryStore, SaveStore};
