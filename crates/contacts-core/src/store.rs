//! The `ContactStore` trait.
//!
//! Implemented by storage backends (`contacts-store-sqlite`,
//! `contacts-store-memory`). The HTTP layer depends on this abstraction, not
//! on any concrete backend; the backend is chosen once at process start.

use std::future::Future;

use crate::contact::{Contact, ContactId, NewContact};

/// Abstraction over a contacts store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every contact, ordered by id.
  fn find_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// The contact with identity `id`, or `None`.
  fn find_by_id(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Persist a new contact. The store assigns the identity.
  fn insert(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Fetch-modify-save: overwrite the name, email and social number of
  /// contact `id` with the values in `patch`.
  ///
  /// Returns the updated contact, or `None` if `id` does not exist.
  fn update_fields(
    &self,
    id: ContactId,
    patch: NewContact,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Hard-delete contact `id` together with its name.
  ///
  /// Returns `false` if nothing matched.
  fn delete_by_id(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
