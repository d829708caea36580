//! Validation layer: turns a [`ContactDraft`] into a [`NewContact`] or a
//! [`ContactPatch`].
//!
//! Every offending field is reported, not just the first one. Values are
//! checked but never rewritten; what the caller sends is what gets stored.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::contact::{ContactDraft, ContactPatch, NewContact};

// ─── Error types ─────────────────────────────────────────────────────────────

/// A contact field, as named on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
  FirstName,
  LastName,
  Email,
  Phone,
  Birthday,
  AdditionalInfo,
}

impl Field {
  /// Every field, in wire order.
  pub const ALL: [Field; 6] = [
    Self::FirstName,
    Self::LastName,
    Self::Email,
    Self::Phone,
    Self::Birthday,
    Self::AdditionalInfo,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::FirstName => "first_name",
      Self::LastName => "last_name",
      Self::Email => "email",
      Self::Phone => "phone",
      Self::Birthday => "birthday",
      Self::AdditionalInfo => "additional_info",
    }
  }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Problem {
  /// Required on create but not supplied.
  Missing,
  /// Supplied but empty or whitespace only.
  Blank,
  InvalidEmail,
  InvalidDate,
  /// Supplied as a JSON value other than a string or `null`.
  NotText,
}

impl fmt::Display for Problem {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Missing => "is required",
      Self::Blank => "must not be blank",
      Self::InvalidEmail => "is not a valid email address",
      Self::InvalidDate => "is not a valid calendar date (expected YYYY-MM-DD)",
      Self::NotText => "must be a string",
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field:   Field,
  pub problem: Problem,
}

/// One or more field-level problems with a submitted contact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationErrors {
  pub errors: Vec<FieldError>,
}

impl ValidationErrors {
  /// Whether `field` is among the offending fields.
  pub fn mentions(&self, field: Field) -> bool {
    self.errors.iter().any(|e| e.field == field)
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("invalid contact: ")?;
    for (i, e) in self.errors.iter().enumerate() {
      if i > 0 {
        f.write_str("; ")?;
      }
      write!(f, "{} {}", e.field, e.problem)?;
    }
    Ok(())
  }
}

// ─── Collector ───────────────────────────────────────────────────────────────

#[derive(Default)]
struct Checker {
  errors: Vec<FieldError>,
}

impl Checker {
  fn fail(&mut self, field: Field, problem: Problem) {
    self.errors.push(FieldError { field, problem });
  }

  fn required(&mut self, field: Field, value: Option<String>) -> Option<String> {
    if value.is_none() {
      self.fail(field, Problem::Missing);
    }
    value
  }

  fn text(&mut self, field: Field, value: String) -> Option<String> {
    if value.trim().is_empty() {
      self.fail(field, Problem::Blank);
      return None;
    }
    Some(value)
  }

  fn email(&mut self, value: String) -> Option<String> {
    let value = self.text(Field::Email, value)?;
    if !is_valid_email(&value) {
      self.fail(Field::Email, Problem::InvalidEmail);
      return None;
    }
    Some(value)
  }

  fn date(&mut self, value: String) -> Option<NaiveDate> {
    let value = self.text(Field::Birthday, value)?;
    match value.parse::<NaiveDate>() {
      Ok(date) => Some(date),
      Err(_) => {
        self.fail(Field::Birthday, Problem::InvalidDate);
        None
      }
    }
  }

  fn into_errors(self) -> ValidationErrors {
    ValidationErrors { errors: self.errors }
  }
}

// ─── Entry points ────────────────────────────────────────────────────────────

/// Validate a create request: all fields but `additional_info` are required.
pub fn new_contact(draft: ContactDraft) -> Result<NewContact, ValidationErrors> {
  let mut c = Checker::default();

  let first_name = c
    .required(Field::FirstName, draft.first_name)
    .and_then(|v| c.text(Field::FirstName, v));
  let last_name = c
    .required(Field::LastName, draft.last_name)
    .and_then(|v| c.text(Field::LastName, v));
  let email = c
    .required(Field::Email, draft.email)
    .and_then(|v| c.email(v));
  let phone = c
    .required(Field::Phone, draft.phone)
    .and_then(|v| c.text(Field::Phone, v));
  let birthday = c
    .required(Field::Birthday, draft.birthday)
    .and_then(|v| c.date(v));

  // A `None` in any slot means an error was recorded for that field.
  match (first_name, last_name, email, phone, birthday) {
    (Some(first_name), Some(last_name), Some(email), Some(phone), Some(birthday)) => {
      Ok(NewContact {
        first_name,
        last_name,
        email,
        phone,
        birthday,
        additional_info: draft.additional_info.flatten(),
      })
    }
    _ => Err(c.into_errors()),
  }
}

/// Validate a partial update: only supplied fields are checked.
///
/// A `null` for a required field counts as "not supplied".
pub fn patch(draft: ContactDraft) -> Result<ContactPatch, ValidationErrors> {
  let mut c = Checker::default();

  let patch = ContactPatch {
    first_name:      draft.first_name.and_then(|v| c.text(Field::FirstName, v)),
    last_name:       draft.last_name.and_then(|v| c.text(Field::LastName, v)),
    email:           draft.email.and_then(|v| c.email(v)),
    phone:           draft.phone.and_then(|v| c.text(Field::Phone, v)),
    birthday:        draft.birthday.and_then(|v| c.date(v)),
    additional_info: draft.additional_info,
  };

  if c.errors.is_empty() {
    Ok(patch)
  } else {
    Err(c.into_errors())
  }
}

// ─── Email grammar ───────────────────────────────────────────────────────────

/// Structural check of an `addr-spec`: dot-atom local part and a hostname with
/// at least two labels. Quoted local parts and address literals are rejected.
pub fn is_valid_email(address: &str) -> bool {
  let Some((local, domain)) = address.split_once('@') else {
    return false;
  };
  if domain.contains('@') {
    return false;
  }
  is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
  const ATEXT_SPECIALS: &str = "!#$%&'*+-/=?^_`{|}~";

  if local.is_empty() || local.len() > 64 {
    return false;
  }
  local.split('.').all(|atom| {
    !atom.is_empty()
      && atom
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ATEXT_SPECIALS.contains(ch))
  })
}

fn is_valid_domain(domain: &str) -> bool {
  if domain.len() > 255 {
    return false;
  }
  let labels: Vec<&str> = domain.split('.').collect();
  if labels.len() < 2 {
    return false;
  }
  let labels_ok = labels.iter().all(|label| {
    (1..=63).contains(&label.len())
      && !label.starts_with('-')
      && !label.ends_with('-')
      && label.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
  });
  let tld_ok = labels
    .last()
    .is_some_and(|tld| !tld.chars().all(|ch| ch.is_ascii_digit()));
  labels_ok && tld_ok
}
