//! Core types and the store trait for the contacts service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Store backends and the HTTP layer depend on it.

pub mod contact;
pub mod store;

pub use contact::{Contact, ContactId, Name, NewContact};
pub use store::ContactStore;
