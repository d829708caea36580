//! The `ContactStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! [`ContactService`](crate::ContactService) and the API layer depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  contact::{Contact, ContactPatch, NewContact},
  query::Predicate,
};

/// Errors a store can report. Uniqueness violations must be recognisable so
/// that callers can report them as a duplicate email rather than a failure.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// `true` if the write was rejected because another contact already has
  /// the email it would have stored.
  fn is_email_conflict(&self) -> bool;
}

/// Abstraction over a Roster contact store backend.
///
/// Every method is a single atomic unit of work. Email uniqueness is enforced
/// by the store itself, atomically with the write that could violate it.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: StoreError;

  /// Persist a new contact under a freshly assigned id.
  ///
  /// Fails with an email-conflict error if the email is already taken.
  fn insert(
    &self,
    contact: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn get(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Contacts in id order, skipping `offset` and returning at most `limit`.
  fn list(
    &self,
    offset: u64,
    limit: u64,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Apply the supplied fields of `patch`. Returns `None` if `id` does not
  /// exist; an empty patch returns the contact unchanged.
  ///
  /// Fails with an email-conflict error if the new email is taken by another
  /// contact.
  fn update(
    &self,
    id: i64,
    patch: ContactPatch,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Remove a contact permanently. Returns `true` if a row was removed.
  fn delete(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// All contacts matching `predicate`, in id order.
  fn query<'a>(
    &'a self,
    predicate: &'a Predicate,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + 'a;
}
