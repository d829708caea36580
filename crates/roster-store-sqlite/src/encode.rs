//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Birthdays are stored twice: as an ISO 8601 date string, and as the integer
//! `month * 100 + day` that window queries compare against.

use chrono::NaiveDate;
use roster_core::contact::{Contact, MonthDay};

use crate::{Error, Result};

/// Column list shared by every `SELECT` and `RETURNING` clause; the order
/// matches [`RawContact::from_row`].
pub const CONTACT_COLUMNS: &str =
  "id, first_name, last_name, email, phone, birthday, additional_info";

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  s.parse::<NaiveDate>()
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

pub fn encode_birthday_md(d: NaiveDate) -> i64 { MonthDay::of(d).key() }

// ─── Integers ────────────────────────────────────────────────────────────────

/// SQLite integers are signed; anything larger saturates, which for `LIMIT`
/// and `OFFSET` means "no bound".
pub fn encode_u64(n: u64) -> i64 { i64::try_from(n).unwrap_or(i64::MAX) }

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw values read directly from a `contacts` row.
pub struct RawContact {
  pub id:              i64,
  pub first_name:      String,
  pub last_name:       String,
  pub email:           String,
  pub phone:           String,
  pub birthday:        String,
  pub additional_info: Option<String>,
}

impl RawContact {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      first_name:      row.get(1)?,
      last_name:       row.get(2)?,
      email:           row.get(3)?,
      phone:           row.get(4)?,
      birthday:        row.get(5)?,
      additional_info: row.get(6)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:              self.id,
      first_name:      self.first_name,
      last_name:       self.last_name,
      email:           self.email,
      phone:           self.phone,
      birthday:        decode_date(&self.birthday)?,
      additional_info: self.additional_info,
    })
  }
}
