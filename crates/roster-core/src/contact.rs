//! Contact types — the single entity managed by Roster.
//!
//! Data flows through three shapes: an untrusted [`ContactDraft`] arrives from
//! the caller, the validation layer turns it into a [`NewContact`] or a
//! [`ContactPatch`], and the store hands back a persisted [`Contact`].

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A stored contact row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  /// Store-assigned; never reused after deletion.
  pub id:              i64,
  pub first_name:      String,
  pub last_name:       String,
  /// Unique across the store, compared exactly as written.
  pub email:           String,
  pub phone:           String,
  pub birthday:        NaiveDate,
  pub additional_info: Option<String>,
}

// ─── NewContact ──────────────────────────────────────────────────────────────

/// A validated create request. The `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
  pub first_name:      String,
  pub last_name:       String,
  pub email:           String,
  pub phone:           String,
  pub birthday:        NaiveDate,
  pub additional_info: Option<String>,
}

impl NewContact {
  /// Attach a store-assigned id.
  pub fn into_contact(self, id: i64) -> Contact {
    Contact {
      id,
      first_name: self.first_name,
      last_name: self.last_name,
      email: self.email,
      phone: self.phone,
      birthday: self.birthday,
      additional_info: self.additional_info,
    }
  }
}

// ─── ContactPatch ────────────────────────────────────────────────────────────

/// A validated partial update. `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
  pub first_name:      Option<String>,
  pub last_name:       Option<String>,
  pub email:           Option<String>,
  pub phone:           Option<String>,
  pub birthday:        Option<NaiveDate>,
  /// `Some(None)` clears the stored value.
  pub additional_info: Option<Option<String>>,
}

impl ContactPatch {
  pub fn is_empty(&self) -> bool { *self == Self::default() }
}

// ─── ContactDraft ────────────────────────────────────────────────────────────

/// Field set as submitted by a caller, before validation.
///
/// Every field is optional text so that problems surface as validation errors
/// naming the field rather than as deserialisation failures. Callers decoding
/// untyped JSON report non-string values with
/// [`Problem::NotText`](crate::validate::Problem::NotText).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactDraft {
  #[serde(default)]
  pub first_name:      Option<String>,
  #[serde(default)]
  pub last_name:       Option<String>,
  #[serde(default)]
  pub email:           Option<String>,
  #[serde(default)]
  pub phone:           Option<String>,
  /// ISO 8601 calendar date, e.g. `1815-12-10`.
  #[serde(default)]
  pub birthday:        Option<String>,
  /// Outer `None`: not supplied. `Some(None)`: explicitly `null`.
  #[serde(default, deserialize_with = "supplied")]
  pub additional_info: Option<Option<String>>,
}

/// Deserialise a present field (including `null`) as `Some(_)`; absent fields
/// fall back to `None` through `#[serde(default)]`.
fn supplied<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Some)
}

// ─── MonthDay ────────────────────────────────────────────────────────────────

/// A recurring calendar position, ignoring the year. Ordered January 1 first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
  pub month: u32,
  pub day:   u32,
}

impl MonthDay {
  pub const FIRST: Self = Self { month: 1, day: 1 };
  pub const LAST: Self = Self { month: 12, day: 31 };

  pub fn of(date: NaiveDate) -> Self {
    Self { month: date.month(), day: date.day() }
  }

  /// Sortable integer key, `month * 100 + day` (e.g. `1228` for December 28).
  pub fn key(self) -> i64 { i64::from(self.month * 100 + self.day) }
}
