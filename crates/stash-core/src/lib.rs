//! String Stash Core Library
//!
//! Domain types, the storage port and the error taxonomy shared by every
//! String Stash backend.

pub mod error;
pub mod ports;
pub mod types;

pub use error::{Result, StashError};
pub use ports::EntryStore;
pub use types::{normalize_text, Entry};
