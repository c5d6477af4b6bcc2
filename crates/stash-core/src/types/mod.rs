//! Core domain types

pub mod entry;

pub use entry::*;
