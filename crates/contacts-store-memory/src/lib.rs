//! In-process backend for the contacts store.
//!
//! Contacts live in an ordered `Vec` behind a [`tokio::sync::RwLock`]. Nothing
//! is persisted; everything is lost when the process exits.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::MemoryStore;

#[cfg(test)]
mod tests;
