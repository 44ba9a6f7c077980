//! [`MemoryStore`] — the in-memory implementation of [`ContactStore`].

use std::sync::Arc;

use contacts_core::{
  contact::{Contact, ContactId, NewContact},
  store::ContactStore,
};
use tokio::sync::RwLock;

use crate::{Error, Result};

/// An ordered, in-memory contact list.
///
/// Cloning is cheap — clones share the same list. Each mutation holds the
/// write lock for its whole read-modify-write, so id assignment never races.
#[derive(Clone, Default)]
pub struct MemoryStore {
  contacts: Arc<RwLock<Vec<Contact>>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Seed a store with existing contacts, kept in the given order.
  pub fn with_contacts(contacts: Vec<Contact>) -> Self {
    Self {
      contacts: Arc::new(RwLock::new(contacts)),
    }
  }
}

/// Next identity: one past the last element, or 1 for an empty list.
fn next_id(contacts: &[Contact]) -> Result<ContactId> {
  match contacts.last() {
    None => Ok(1),
    Some(last) => last.id.checked_add(1).ok_or(Error::IdsExhausted(last.id)),
  }
}

impl ContactStore for MemoryStore {
  type Error = Error;

  async fn find_all(&self) -> Result<Vec<Contact>> {
    let contacts = self.contacts.read().await.clone();
    tracing::debug!(?contacts, "find_all");
    Ok(contacts)
  }

  async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>> {
    let found = self
      .contacts
      .read()
      .await
      .iter()
      .find(|c| c.id == id)
      .cloned();
    tracing::debug!(id, contact = ?found, "find_by_id");
    Ok(found)
  }

  async fn insert(&self, input: NewContact) -> Result<Contact> {
    let mut contacts = self.contacts.write().await;
    let contact = Contact::from_new(next_id(&contacts)?, input);
    contacts.push(contact.clone());
    tracing::info!(%contact, "inserted contact");
    Ok(contact)
  }

  async fn update_fields(
    &self,
    id: ContactId,
    patch: NewContact,
  ) -> Result<Option<Contact>> {
    let mut contacts = self.contacts.write().await;
    let Some(idx) = contacts.iter().position(|c| c.id == id) else {
      tracing::debug!(id, "update_fields: no such contact");
      return Ok(None);
    };

    let mut updated = contacts[idx].clone();
    updated.apply(patch);
    contacts.splice(idx..=idx, [updated.clone()]);

    tracing::info!(contact = %updated, "updated contact");
    Ok(Some(updated))
  }

  async fn delete_by_id(&self, id: ContactId) -> Result<bool> {
    let mut contacts = self.contacts.write().await;
    let Some(idx) = contacts.iter().position(|c| c.id == id) else {
      tracing::debug!(id, "delete_by_id: no such contact");
      return Ok(false);
    };

    let removed = contacts.remove(idx);
    tracing::info!(contact = %removed, "deleted contact");
    Ok(true)
  }
}
