//! Tests for `MemoryStore`.

use contacts_core::{
  contact::{Contact, Name, NewContact},
  store::ContactStore,
};

use crate::{Error, MemoryStore};

fn person(first: &str, last: &str, email: &str) -> NewContact {
  NewContact {
    name:          Name {
      first_name: first.into(),
      last_name:  last.into(),
    },
    social_number: format!("ssn-{first}"),
    email:         email.into(),
  }
}

// ─── Insert ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn first_insert_gets_id_one() {
  let s = MemoryStore::new();
  let c = s.insert(person("Ada", "Lovelace", "ada@x.com")).await.unwrap();
  assert_eq!(c.id, 1);
  assert_eq!(c.name.first_name, "Ada");
  assert_eq!(c.social_number, "ssn-Ada");
}

#[tokio::test]
async fn ids_follow_the_last_element() {
  let s = MemoryStore::with_contacts(vec![Contact::from_new(
    10,
    person("Ada", "Lovelace", "ada@x.com"),
  )]);
  let c = s.insert(person("Alan", "Turing", "alan@x.com")).await.unwrap();
  assert_eq!(c.id, 11);
}

#[tokio::test]
async fn insert_after_max_id_fails_without_change() {
  let seeded = Contact::from_new(u32::MAX, person("Ada", "Lovelace", "ada@x.com"));
  let s = MemoryStore::with_contacts(vec![seeded.clone()]);

  let result = s.insert(person("Alan", "Turing", "alan@x.com")).await;
  assert!(matches!(result, Err(Error::IdsExhausted(u32::MAX))));
  assert_eq!(s.find_all().await.unwrap(), vec![seeded]);
}

#[tokio::test]
async fn concurrent_inserts_get_distinct_ids() {
  let s = MemoryStore::new();
  let mut handles = Vec::new();
  for i in 0..32 {
    let s = s.clone();
    handles.push(tokio::spawn(async move {
      s.insert(person(&format!("p{i}"), "x", "p@x.com")).await.unwrap().id
    }));
  }

  let mut ids = Vec::new();
  for h in handles {
    ids.push(h.await.unwrap());
  }
  ids.sort_unstable();
  assert_eq!(ids, (1..=32).collect::<Vec<_>>());
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn find_all_keeps_insertion_order() {
  let s = MemoryStore::new();
  s.insert(person("Ada", "Lovelace", "ada@x.com")).await.unwrap();
  s.insert(person("Alan", "Turing", "alan@x.com")).await.unwrap();
  s.insert(person("Grace", "Hopper", "grace@x.com")).await.unwrap();

  let all = s.find_all().await.unwrap();
  let firsts: Vec<_> = all.iter().map(|c| c.name.first_name.as_str()).collect();
  assert_eq!(firsts, ["Ada", "Alan", "Grace"]);
}

#[tokio::test]
async fn find_by_id_round_trips() {
  let s = MemoryStore::new();
  let input = person("Ada", "Lovelace", "ada@x.com");
  let created = s.insert(input.clone()).await.unwrap();

  let fetched = s.find_by_id(created.id).await.unwrap().unwrap();
  assert_eq!(fetched, Contact::from_new(created.id, input));
}

#[tokio::test]
async fn find_by_id_missing_returns_none() {
  let s = MemoryStore::new();
  assert!(s.find_by_id(1).await.unwrap().is_none());
  assert!(s.find_by_id(0).await.unwrap().is_none());
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_replaces_in_place() {
  let s = MemoryStore::new();
  s.insert(person("Ada", "Lovelace", "ada@x.com")).await.unwrap();
  let middle = s.insert(person("Alan", "Turing", "alan@x.com")).await.unwrap();
  s.insert(person("Grace", "Hopper", "grace@x.com")).await.unwrap();

  let updated = s
    .update_fields(middle.id, person("Alonzo", "Church", "alonzo@x.com"))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.id, middle.id);

  let all = s.find_all().await.unwrap();
  assert_eq!(all.len(), 3);
  assert_eq!(all[1], updated);
  assert_eq!(all[1].email, "alonzo@x.com");
}

#[tokio::test]
async fn update_is_idempotent() {
  let s = MemoryStore::new();
  let c = s.insert(person("Ada", "Lovelace", "ada@x.com")).await.unwrap();
  let patch = person("Grace", "Hopper", "grace@x.com");

  let once = s.update_fields(c.id, patch.clone()).await.unwrap();
  let twice = s.update_fields(c.id, patch).await.unwrap();
  assert_eq!(once, twice);
  assert_eq!(s.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_missing_returns_none() {
  let s = MemoryStore::new();
  s.insert(person("Ada", "Lovelace", "ada@x.com")).await.unwrap();
  let result = s
    .update_fields(99, person("Grace", "Hopper", "grace@x.com"))
    .await
    .unwrap();
  assert!(result.is_none());
  assert_eq!(s.find_by_id(1).await.unwrap().unwrap().name.first_name, "Ada");
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_only_the_match() {
  let s = MemoryStore::new();
  let a = s.insert(person("Ada", "Lovelace", "ada@x.com")).await.unwrap();
  let b = s.insert(person("Alan", "Turing", "alan@x.com")).await.unwrap();

  assert!(s.delete_by_id(a.id).await.unwrap());
  assert!(s.find_by_id(a.id).await.unwrap().is_none());

  let all = s.find_all().await.unwrap();
  assert_eq!(all, vec![b]);
}

#[tokio::test]
async fn delete_missing_returns_false() {
  let s = MemoryStore::new();
  assert!(!s.delete_by_id(3).await.unwrap());
}

#[tokio::test]
async fn deleting_the_last_element_frees_its_id() {
  let s = MemoryStore::new();
  s.insert(person("Ada", "Lovelace", "ada@x.com")).await.unwrap();
  let b = s.insert(person("Alan", "Turing", "alan@x.com")).await.unwrap();
  s.delete_by_id(b.id).await.unwrap();

  let c = s.insert(person("Grace", "Hopper", "grace@x.com")).await.unwrap();
  assert_eq!(c.id, b.id);
}
