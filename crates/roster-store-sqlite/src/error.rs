//! Error type for `roster-store-sqlite`.

use roster_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// The write would have given two contacts the same email.
  #[error("email already in use")]
  EmailConflict,

  #[error("date parse error: {0}")]
  DateParse(String),
}

impl StoreError for Error {
  fn is_email_conflict(&self) -> bool { matches!(self, Self::EmailConflict) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
