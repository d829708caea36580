//! Query layer: the predicate language understood by every
//! [`ContactStore`](crate::store::ContactStore), and constructors for the
//! three lookups the service needs (by id, by text, by birthday window).

use chrono::{Days, NaiveDate};

use crate::contact::MonthDay;

/// Number of days after today still counted as "upcoming", inclusive.
pub const UPCOMING_BIRTHDAY_DAYS: u64 = 7;

// ─── Predicate ───────────────────────────────────────────────────────────────

/// A text column that predicates can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColumn {
  FirstName,
  LastName,
  Email,
  Phone,
  AdditionalInfo,
}

/// A composable boolean expression over contact columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
  /// Matches every contact.
  Always,
  IdEq(i64),
  /// Exact, case-sensitive equality.
  TextEq { column: TextColumn, value: String },
  /// Case-insensitive (ASCII) substring match; `needle` is literal.
  Contains { column: TextColumn, needle: String },
  /// Birthday month/day within `from..=to`, ignoring the birth year.
  /// Requires `from <= to`; wrapping ranges are expressed with [`Self::Or`].
  BirthdayBetween { from: MonthDay, to: MonthDay },
  And(Vec<Predicate>),
  Or(Vec<Predicate>),
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

pub fn by_id(id: i64) -> Predicate { Predicate::IdEq(id) }

pub fn by_email(email: &str) -> Predicate {
  Predicate::TextEq { column: TextColumn::Email, value: email.to_owned() }
}

/// First name, last name or email containing `text`. An empty `text` matches
/// every contact.
pub fn text_search(text: &str) -> Predicate {
  let contains = |column| Predicate::Contains { column, needle: text.to_owned() };
  Predicate::Or(vec![
    contains(TextColumn::FirstName),
    contains(TextColumn::LastName),
    contains(TextColumn::Email),
  ])
}

// ─── Birthday window ─────────────────────────────────────────────────────────

/// The recurring month/day range `[today, today + n days]`.
///
/// Birth years are ignored, so a birthday recurs every year. When the range
/// runs past December 31 it is split into two ranges, one at each end of the
/// calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthdayWindow {
  pub start: MonthDay,
  pub end:   MonthDay,
}

impl BirthdayWindow {
  /// The window of [`UPCOMING_BIRTHDAY_DAYS`] days starting at `today`.
  pub fn upcoming(today: NaiveDate) -> Self {
    let last = today
      .checked_add_days(Days::new(UPCOMING_BIRTHDAY_DAYS))
      .unwrap_or(NaiveDate::MAX);
    Self { start: MonthDay::of(today), end: MonthDay::of(last) }
  }

  pub fn wraps(&self) -> bool { self.end < self.start }

  /// Whether a birthday on `date` (any year) falls inside the window.
  pub fn contains(&self, date: NaiveDate) -> bool {
    let md = MonthDay::of(date);
    if self.wraps() {
      md >= self.start || md <= self.end
    } else {
      (self.start..=self.end).contains(&md)
    }
  }

  pub fn to_predicate(self) -> Predicate {
    if self.wraps() {
      Predicate::Or(vec![
        Predicate::BirthdayBetween { from: self.start, to: MonthDay::LAST },
        Predicate::BirthdayBetween { from: MonthDay::FIRST, to: self.end },
      ])
    } else {
      Predicate::BirthdayBetween { from: self.start, to: self.end }
    }
  }
}
