//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path             | Notes |
//! |----------|------------------|-------|
//! | `GET`    | `/contacts`      | All contacts |
//! | `POST`   | `/contacts`      | Body: [`NewContact`]; returns 201 + stored contact |
//! | `GET`    | `/contacts/:id`  | 404 if not found |
//! | `PUT`    | `/contacts/:id`  | Body: [`NewContact`]; returns 202 + updated contact |
//! | `DELETE` | `/contacts/:id`  | 204, or 404 if not found |
//!
//! An `id` segment that is not an unsigned integer is read as `0`, which no
//! contact ever has.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::{StatusCode, header},
  response::IntoResponse,
};
use contacts_core::{
  contact::{Contact, ContactId, NewContact},
  store::ContactStore,
};

use crate::error::ApiError;

fn parse_id(raw: &str) -> ContactId { raw.parse().unwrap_or(0) }

fn decode_body(
  body: Result<Json<NewContact>, JsonRejection>,
) -> Result<NewContact, ApiError> {
  match body {
    Ok(Json(input)) => Ok(input),
    Err(rejection) => {
      tracing::debug!(error = %rejection, "rejected contact body");
      Err(rejection.into())
    }
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
{
  let contacts = store
    .find_all()
    .await
    .map_err(ApiError::store)?;
  Ok(Json(contacts))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  let id = parse_id(&raw_id);
  let contact = store
    .find_by_id(id)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NoSuchContact(id))?;
  Ok(Json(contact))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts` — returns 201 + the stored [`Contact`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewContact>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
{
  let input = decode_body(body)?;
  let contact = store
    .insert(input)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /contacts/:id` — overwrites name, email and social number.
///
/// Fields absent from the body are overwritten with empty strings.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
  body: Result<Json<NewContact>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
{
  let id = parse_id(&raw_id);
  let patch = decode_body(body)?;
  let contact = store
    .update_fields(id, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NoSuchContact(id))?;
  Ok((StatusCode::ACCEPTED, Json(contact)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/:id` — hard delete; 204 with an empty body.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
{
  let id = parse_id(&raw_id);
  let removed = store
    .delete_by_id(id)
    .await
    .map_err(ApiError::store)?;
  if !removed {
    return Err(ApiError::NoSuchContact(id));
  }
  Ok((
    StatusCode::NO_CONTENT,
    [(header::CONTENT_TYPE, "application/json")],
  ))
}
