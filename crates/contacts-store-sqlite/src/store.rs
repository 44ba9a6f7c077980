//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use contacts_core::{
  contact::{Contact, ContactId, Name, NewContact},
  store::ContactStore,
};
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  schema::{DROP_SCHEMA, SCHEMA},
};

/// What to do with existing tables when the store is opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaInit {
  /// Create missing tables and keep existing rows.
  #[default]
  Preserve,
  /// Drop and recreate every table. Destroys all data; development only.
  Reset,
}

const SELECT_CONTACT: &str = "
SELECT c.id, n.first_name, n.last_name, c.social_number, c.email
FROM contacts c
JOIN names n ON n.id = c.name_id";

fn contact_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Contact> {
  Ok(Contact {
    id:            row.get(0)?,
    name:          Name {
      first_name: row.get(1)?,
      last_name:  row.get(2)?,
    },
    social_number: row.get(3)?,
    email:         row.get(4)?,
  })
}

fn fetch_contact(
  conn: &rusqlite::Connection,
  id: ContactId,
) -> rusqlite::Result<Option<Contact>> {
  conn
    .query_row(
      &format!("{SELECT_CONTACT} WHERE c.id = ?1"),
      rusqlite::params![id],
      contact_from_row,
    )
    .optional()
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contacts store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and initialise the schema.
  pub async fn open(path: impl AsRef<Path>, init: SchemaInit) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema(init).await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema(SchemaInit::Preserve).await?;
    Ok(store)
  }

  async fn init_schema(&self, init: SchemaInit) -> Result<()> {
    if init == SchemaInit::Reset {
      return self.reset_schema().await;
    }
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Drop and recreate both tables, discarding every contact.
  pub async fn reset_schema(&self) -> Result<()> {
    tracing::warn!("dropping and recreating contact tables");
    self
      .conn
      .call(|conn| {
        conn.execute_batch(DROP_SCHEMA)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Round-trip a trivial query to confirm the connection is usable.
  pub async fn ping(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  #[cfg(test)]
  pub(crate) async fn row_count(&self, table: &'static str) -> Result<i64> {
    let n = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        Ok(conn.query_row(&sql, [], |r| r.get::<_, i64>(0))?)
      })
      .await?;
    Ok(n)
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = crate::Error;

  async fn find_all(&self) -> Result<Vec<Contact>> {
    let contacts = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("{SELECT_CONTACT} ORDER BY c.id"))?;
        let rows = stmt
          .query_map([], contact_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    tracing::debug!(?contacts, "find_all");
    Ok(contacts)
  }

  async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>> {
    let found = self
      .conn
      .call(move |conn| Ok(fetch_contact(conn, id)?))
      .await?;

    tracing::debug!(id, contact = ?found, "find_by_id");
    Ok(found)
  }

  async fn insert(&self, input: NewContact) -> Result<Contact> {
    let contact = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let name_id: i64 = tx.query_row(
          "INSERT INTO names (first_name, last_name) VALUES (?1, ?2) RETURNING id",
          rusqlite::params![input.name.first_name, input.name.last_name],
          |r| r.get(0),
        )?;
        let id: ContactId = tx.query_row(
          "INSERT INTO contacts (name_id, social_number, email)
           VALUES (?1, ?2, ?3) RETURNING id",
          rusqlite::params![name_id, input.social_number, input.email],
          |r| r.get(0),
        )?;
        tx.commit()?;
        Ok(Contact::from_new(id, input))
      })
      .await?;

    tracing::info!(%contact, "inserted contact");
    Ok(contact)
  }

  async fn update_fields(
    &self,
    id: ContactId,
    patch: NewContact,
  ) -> Result<Option<Contact>> {
    let updated = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(mut contact) = fetch_contact(&tx, id)? else {
          return Ok(None);
        };
        contact.apply(patch);

        tx.execute(
          "UPDATE names SET first_name = ?1, last_name = ?2
           WHERE id = (SELECT name_id FROM contacts WHERE id = ?3)",
          rusqlite::params![contact.name.first_name, contact.name.last_name, id],
        )?;
        tx.execute(
          "UPDATE contacts SET social_number = ?1, email = ?2 WHERE id = ?3",
          rusqlite::params![contact.social_number, contact.email, id],
        )?;
        tx.commit()?;
        Ok(Some(contact))
      })
      .await?;

    match &updated {
      Some(contact) => tracing::info!(%contact, "updated contact"),
      None => tracing::debug!(id, "update_fields: no such contact"),
    }
    Ok(updated)
  }

  async fn delete_by_id(&self, id: ContactId) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(contact) = fetch_contact(&tx, id)? else {
          return Ok(None);
        };
        // Deleting the owned name cascades to the contact row.
        tx.execute(
          "DELETE FROM names WHERE id = (SELECT name_id FROM contacts WHERE id = ?1)",
          rusqlite::params![id],
        )?;
        tx.commit()?;
        Ok(Some(contact))
      })
      .await?;

    match &removed {
      Some(contact) => tracing::info!(%contact, "deleted contact"),
      None => tracing::debug!(id, "delete_by_id: no such contact"),
    }
    Ok(removed.is_some())
  }
}
