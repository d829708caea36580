//! Error types for `roster-core`.

use thiserror::Error;

use crate::validate::ValidationErrors;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] ValidationErrors),

  #[error("email already registered: {0}")]
  DuplicateEmail(String),

  #[error("contact not found: {0}")]
  NotFound(i64),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
