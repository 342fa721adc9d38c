//! Storage Layer
//!
//! Durable persistence for wizard sessions. The wizard core stays
//! storage-free; callers hand snapshots to this layer explicitly.

pub mod session;

pub use session::{memory_pool, open_pool, DbPool, PersistedSession, SessionStore};
