//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by any [`roster_core::store::ContactStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = roster_api::api_router(Arc::new(store));
//! ```

pub mod contacts;
pub mod error;

use std::sync::Arc;

use axum::{Router, routing::get};
use roster_core::{ContactService, store::ContactStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The collection and search routes also answer with a trailing slash, as
/// older clients expect.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ContactStore + 'static,
{
  let service = ContactService::new(store);

  Router::new()
    .route("/contacts", get(contacts::list::<S>).post(contacts::create::<S>))
    .route("/contacts/", get(contacts::list::<S>).post(contacts::create::<S>))
    .route("/contacts/search", get(contacts::search::<S>))
    .route("/contacts/search/", get(contacts::search::<S>))
    .route(
      "/contacts/upcoming_birthdays",
      get(contacts::upcoming_birthdays::<S>),
    )
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .put(contacts::update::<S>)
        .delete(contacts::delete::<S>),
    )
    .with_state(service)
}

// ─── Integration tests ────────────────────────────────────────────────────────
