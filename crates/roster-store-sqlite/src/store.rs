//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use roster_core::{
  contact::{Contact, ContactPatch, NewContact},
  query::{self, Predicate},
  store::ContactStore,
};
use rusqlite::{OptionalExtension as _, types::Value};

use crate::{
  Error, Result,
  encode::{CONTACT_COLUMNS, RawContact, encode_birthday_md, encode_date, encode_u64},
  predicate::{Compiled, compile},
  schema::SCHEMA,
};

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Outcome of a write that may trip the `email` UNIQUE constraint.
enum Written<T> {
  Done(T),
  EmailTaken,
}

impl<T> Written<T> {
  fn into_result(self) -> Result<T> {
    match self {
      Self::Done(t) => Ok(t),
      Self::EmailTaken => Err(Error::EmailConflict),
    }
  }
}

/// `email` is the only UNIQUE column; the primary key reports
/// `SQLITE_CONSTRAINT_PRIMARYKEY` instead.
fn is_unique_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(f, _)
      if f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster contact store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened contact store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `SELECT` over `contacts` filtered by `predicate`, in id order,
  /// optionally paged by `(offset, limit)`.
  async fn select(
    &self,
    predicate: &Predicate,
    page: Option<(u64, u64)>,
  ) -> Result<Vec<Contact>> {
    let Compiled { sql: where_clause, mut params } = compile(predicate);

    let mut sql =
      format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE {where_clause} ORDER BY id");
    if let Some((offset, limit)) = page {
      sql.push_str(" LIMIT ? OFFSET ?");
      params.push(Value::Integer(encode_u64(limit)));
      params.push(Value::Integer(encode_u64(offset)));
    }

    let raws: Vec<RawContact> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = Error;

  async fn insert(&self, contact: NewContact) -> Result<Contact> {
    let birthday_str = encode_date(contact.birthday);
    let birthday_md  = encode_birthday_md(contact.birthday);

    let written = self
      .conn
      .call(move |conn| {
        let res = conn.execute(
          "INSERT INTO contacts (
             first_name, last_name, email, phone,
             birthday, birthday_md, additional_info
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            contact.first_name,
            contact.last_name,
            contact.email,
            contact.phone,
            birthday_str,
            birthday_md,
            contact.additional_info,
          ],
        );
        match res {
          Ok(_) => Ok(Written::Done(contact.into_contact(conn.last_insert_rowid()))),
          Err(e) if is_unique_violation(&e) => Ok(Written::EmailTaken),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    written.into_result()
  }

  async fn get(&self, id: i64) -> Result<Option<Contact>> {
    let found = self.select(&query::by_id(id), None).await?;
    Ok(found.into_iter().next())
  }

  async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Contact>> {
    self.select(&Predicate::Always, Some((offset, limit))).await
  }

  async fn update(&self, id: i64, patch: ContactPatch) -> Result<Option<Contact>> {
    let birthday_str = patch.birthday.map(encode_date);
    let birthday_md  = patch.birthday.map(encode_birthday_md);
    let set_info     = patch.additional_info.is_some();
    let info         = patch.additional_info.flatten();
    let sql = format!(
      "UPDATE contacts SET
         first_name      = COALESCE(?2, first_name),
         last_name       = COALESCE(?3, last_name),
         email           = COALESCE(?4, email),
         phone           = COALESCE(?5, phone),
         birthday        = COALESCE(?6, birthday),
         birthday_md     = COALESCE(?7, birthday_md),
         additional_info = CASE WHEN ?8 THEN ?9 ELSE additional_info END
       WHERE id = ?1
       RETURNING {CONTACT_COLUMNS}"
    );

    let written = self
      .conn
      .call(move |conn| {
        let res = conn
          .query_row(
            &sql,
            rusqlite::params![
              id,
              patch.first_name,
              patch.last_name,
              patch.email,
              patch.phone,
              birthday_str,
              birthday_md,
              set_info,
              info,
            ],
            RawContact::from_row,
          )
          .optional();
        match res {
          Ok(raw) => Ok(Written::Done(raw)),
          Err(e) if is_unique_violation(&e) => Ok(Written::EmailTaken),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    written.into_result()?.map(RawContact::into_contact).transpose()
  }

  async fn delete(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        let n = conn.execute("DELETE FROM contacts WHERE id = ?1", rusqlite::params![id])?;
        Ok(n > 0)
      })
      .await?;
    Ok(removed)
  }

  async fn query(&self, predicate: &Predicate) -> Result<Vec<Contact>> {
    self.select(predicate, None).await
  }
}
