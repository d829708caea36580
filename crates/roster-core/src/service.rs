//! [`ContactService`] — the user-facing contact operations.
//!
//! The service owns the mapping from validation and store outcomes to the
//! error taxonomy in [`crate::Error`]. It holds no state besides the injected
//! store handle.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  contact::{Contact, ContactDraft},
  query::{self, BirthdayWindow},
  store::{ContactStore, StoreError},
  validate,
};

/// Default `offset` for [`ContactService::list`].
pub const DEFAULT_OFFSET: u64 = 0;
/// Default `limit` for [`ContactService::list`]. Larger limits are honoured.
pub const DEFAULT_LIMIT: u64 = 100;

fn store_err<E: StoreError>(e: E) -> Error { Error::Store(Box::new(e)) }

/// Contact operations over a store handle.
///
/// Cloning is cheap — the store is reference-counted.
pub struct ContactService<S> {
  store: Arc<S>,
}

impl<S> Clone for ContactService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: ContactStore> ContactService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Validate and persist a new contact.
  ///
  /// An email already in use is reported as [`Error::DuplicateEmail`], whether
  /// it is caught by the lookup up front or by the store's own constraint when
  /// a concurrent create wins the race.
  pub async fn create(&self, draft: ContactDraft) -> Result<Contact> {
    let contact = validate::new_contact(draft)?;

    let same_email = query::by_email(&contact.email);
    let taken = self.store.query(&same_email).await.map_err(store_err)?;
    if !taken.is_empty() {
      return Err(Error::DuplicateEmail(contact.email));
    }

    let email = contact.email.clone();
    match self.store.insert(contact).await {
      Ok(created) => {
        info!(id = created.id, "created contact");
        Ok(created)
      }
      Err(e) if e.is_email_conflict() => {
        warn!(%email, "email claimed by a concurrent write");
        Err(Error::DuplicateEmail(email))
      }
      Err(e) => Err(store_err(e)),
    }
  }

  /// Contacts in store order. `offset` defaults to [`DEFAULT_OFFSET`] and
  /// `limit` to [`DEFAULT_LIMIT`].
  pub async fn list(&self, offset: Option<u64>, limit: Option<u64>) -> Result<Vec<Contact>> {
    let offset = offset.unwrap_or(DEFAULT_OFFSET);
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    debug!(offset, limit, "listing contacts");
    self.store.list(offset, limit).await.map_err(store_err)
  }

  pub async fn get(&self, id: i64) -> Result<Contact> {
    debug!(id, "fetching contact");
    self
      .store
      .get(id)
      .await
      .map_err(store_err)?
      .ok_or(Error::NotFound(id))
  }

  /// Apply the supplied fields of `draft` to contact `id`.
  ///
  /// Existence is checked before validation, so an unknown id reports
  /// [`Error::NotFound`] even when the draft is also invalid.
  pub async fn update(&self, id: i64, draft: ContactDraft) -> Result<Contact> {
    if self.store.get(id).await.map_err(store_err)?.is_none() {
      return Err(Error::NotFound(id));
    }

    let patch = validate::patch(draft)?;
    let email = patch.email.clone();

    match self.store.update(id, patch).await {
      Ok(Some(updated)) => {
        info!(id, "updated contact");
        Ok(updated)
      }
      // Deleted between the existence check and the write.
      Ok(None) => Err(Error::NotFound(id)),
      Err(e) if e.is_email_conflict() => Err(Error::DuplicateEmail(email.unwrap_or_default())),
      Err(e) => Err(store_err(e)),
    }
  }

  pub async fn delete(&self, id: i64) -> Result<()> {
    if !self.store.delete(id).await.map_err(store_err)? {
      return Err(Error::NotFound(id));
    }
    info!(id, "deleted contact");
    Ok(())
  }

  /// Contacts whose first name, last name or email contains `text`, ignoring
  /// ASCII case. The empty string matches every contact.
  pub async fn search(&self, text: &str) -> Result<Vec<Contact>> {
    debug!(text, "searching contacts");
    let predicate = query::text_search(text);
    self.store.query(&predicate).await.map_err(store_err)
  }

  /// Contacts whose birthday falls within the next
  /// [`UPCOMING_BIRTHDAY_DAYS`](query::UPCOMING_BIRTHDAY_DAYS) days of the
  /// local calendar, today included.
  pub async fn upcoming_birthdays(&self) -> Result<Vec<Contact>> {
    self.upcoming_birthdays_on(Local::now().date_naive()).await
  }

  /// [`Self::upcoming_birthdays`] as seen on `today`.
  pub async fn upcoming_birthdays_on(&self, today: NaiveDate) -> Result<Vec<Contact>> {
    let window = BirthdayWindow::upcoming(today);
    debug!(%today, ?window, "querying upcoming birthdays");
    let predicate = window.to_predicate();
    self.store.query(&predicate).await.map_err(store_err)
  }
}
