//! Storage layer
//!
//! Two interchangeable `EntryStore` backends: a process-local list and a
//! Redis list. Exactly one is chosen at startup.

pub mod memory;
pub mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;
