//! HTTP handlers

pub mod health;
pub mod strings;

pub use health::health;
