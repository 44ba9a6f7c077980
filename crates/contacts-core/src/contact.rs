//! Contact types.
//!
//! A [`Contact`] owns exactly one [`Name`]. Backends may store the name in a
//! separate row, but on the wire and in memory it is a plain value embedded
//! in the contact.

use std::{fmt, marker::PhantomData};

use serde::{
  Deserialize, Deserializer, Serialize,
  de::{MapAccess, Visitor, value::MapAccessDeserializer},
};

/// Store-assigned contact identity. Never `0` for a persisted contact.
pub type ContactId = u32;

/// A person's name, owned by a [`Contact`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Name {
  pub first_name: String,
  pub last_name:  String,
}

/// A persisted contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub id:            ContactId,
  #[serde(rename = "contact_name", deserialize_with = "object_only")]
  pub name:          Name,
  pub social_number: String,
  pub email:         String,
}

/// The mutable fields of a contact, as accepted by create and update.
///
/// Every field defaults to empty when absent, so an update replaces all of
/// them: fields missing from the body are overwritten with `""`. Any `id` in
/// the body is ignored. Only a JSON object is accepted; arrays are rejected
/// even though serde would otherwise map them onto fields by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewContact {
  #[serde(rename = "contact_name")]
  pub name:          Name,
  pub social_number: String,
  pub email:         String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct NewContactFields {
  #[serde(rename = "contact_name", deserialize_with = "object_only")]
  name:          Name,
  social_number: String,
  email:         String,
}

impl<'de> Deserialize<'de> for NewContact {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let fields: NewContactFields = object_only(deserializer)?;
    Ok(Self {
      name:          fields.name,
      social_number: fields.social_number,
      email:         fields.email,
    })
  }
}

// ─── Object-only decoding ────────────────────────────────────────────────────

struct ObjectOnly<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for ObjectOnly<T> {
  type Value = T;

  fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("a JSON object")
  }

  fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<T, A::Error> {
    T::deserialize(MapAccessDeserializer::new(map))
  }
}

/// Decode `T` from a map, refusing sequences and scalars.
fn object_only<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  deserializer.deserialize_map(ObjectOnly(PhantomData))
}

impl Contact {
  /// Build a contact from its input fields and an assigned identity.
  pub fn from_new(id: ContactId, input: NewContact) -> Self {
    Self {
      id,
      name: input.name,
      social_number: input.social_number,
      email: input.email,
    }
  }

  /// Overwrite every mutable field from `patch`, keeping `id`.
  pub fn apply(&mut self, patch: NewContact) {
    self.name = patch.name;
    self.email = patch.email;
    self.social_number = patch.social_number;
  }
}

impl fmt::Display for Contact {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "#{} {} {} <{}>",
      self.id, self.name.first_name, self.name.last_name, self.email
    )
  }
}
