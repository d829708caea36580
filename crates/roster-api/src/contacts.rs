//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | Optional `?skip=` (alias `offset`, default 0) and `?limit=` (default 100) |
//! | `POST`   | `/contacts` | Body: [`ContactDraft`]; returns 201 + stored contact |
//! | `GET`    | `/contacts/search` | `?query=`; a missing query matches everyone |
//! | `GET`    | `/contacts/upcoming_birthdays` | Birthdays in the next 7 days |
//! | `GET`    | `/contacts/{id}` | 404 if not found |
//! | `PUT`    | `/contacts/{id}` | Body: any subset of [`ContactDraft`] fields |
//! | `DELETE` | `/contacts/{id}` | `{"detail":"Contact deleted"}` |
//!
//! Bodies that are not a JSON object answer 422 with a JSON error; fields
//! holding non-string values are reported in `fields` as `not_text`.

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  ContactService,
  contact::{Contact, ContactDraft},
  store::ContactStore,
  validate::{Field, FieldError, Problem, ValidationErrors},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiError;

// ─── Body decoding ────────────────────────────────────────────────────────────

/// Decode a request body into a [`ContactDraft`].
///
/// A field holding anything but a string or `null` is reported the same way
/// as any other invalid field, alongside every other offending field.
fn read_draft(body: Result<Json<Value>, JsonRejection>) -> Result<ContactDraft, ApiError> {
  let Json(body) = body?;
  let Value::Object(ref map) = body else {
    return Err(ApiError::Body("expected a JSON object".into()));
  };

  let errors: Vec<FieldError> = Field::ALL
    .into_iter()
    .filter(|f| matches!(map.get(f.as_str()), Some(v) if !v.is_string() && !v.is_null()))
    .map(|field| FieldError { field, problem: Problem::NotText })
    .collect();
  if !errors.is_empty() {
    return Err(ApiError::Invalid(ValidationErrors { errors }));
  }

  serde_json::from_value(body).map_err(|e| ApiError::Body(e.to_string()))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  #[serde(alias = "offset")]
  pub skip:  Option<u64>,
  pub limit: Option<u64>,
}

/// `GET /contacts[?skip=<n>][&limit=<n>]`
pub async fn list<S>(
  State(service): State<ContactService<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore + 'static,
{
  let contacts = service.list(params.skip, params.limit).await?;
  Ok(Json(contacts))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts` — returns 201 + the stored [`Contact`].
pub async fn create<S>(
  State(service): State<ContactService<S>>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore + 'static,
{
  let contact = service.create(read_draft(body)?).await?;
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/{id}`
pub async fn get_one<S>(
  State(service): State<ContactService<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore + 'static,
{
  Ok(Json(service.get(id).await?))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /contacts/{id}` — only the fields present in the body change.
pub async fn update<S>(
  State(service): State<ContactService<S>>,
  Path(id): Path<i64>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore + 'static,
{
  Ok(Json(service.update(id, read_draft(body)?).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/{id}`
pub async fn delete<S>(
  State(service): State<ContactService<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError>
where
  S: ContactStore + 'static,
{
  service.delete(id).await?;
  Ok(Json(json!({ "detail": "Contact deleted" })))
}

// ─── Search ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  #[serde(default)]
  pub query: String,
}

/// `GET /contacts/search?query=<text>`
pub async fn search<S>(
  State(service): State<ContactService<S>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore + 'static,
{
  Ok(Json(service.search(&params.query).await?))
}

// ─── Upcoming birthdays ───────────────────────────────────────────────────────

/// `GET /contacts/upcoming_birthdays`
pub async fn upcoming_birthdays<S>(
  State(service): State<ContactService<S>>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore + 'static,
{
  Ok(Json(service.upcoming_birthdays().await?))
}
