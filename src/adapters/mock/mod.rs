//! In-memory adapters for testing.

pub mod storage;

pub use storage::MemoryTokenStore;
