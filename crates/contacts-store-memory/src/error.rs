//! Error type for `contacts-store-memory`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The last contact already holds the largest representable id.
  #[error("no contact id left after {0}")]
  IdsExhausted(contacts_core::ContactId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
