//! `ContactService` over a real (in-memory) SQLite store.

use std::sync::Arc;

use chrono::NaiveDate;
use roster_core::{
  ContactService, Error,
  contact::ContactDraft,
  validate::{Field, Problem},
};

use crate::SqliteStore;

async fn service() -> ContactService<SqliteStore> {
  let store = SqliteStore::open_in_memory().await.expect("in-memory store");
  ContactService::new(Arc::new(store))
}

fn draft(first: &str, last: &str, email: &str, birthday: &str) -> ContactDraft {
  ContactDraft {
    first_name:      Some(first.into()),
    last_name:       Some(last.into()),
    email:           Some(email.into()),
    phone:           Some("555-0100".into()),
    birthday:        Some(birthday.into()),
    additional_info: None,
  }
}

fn ada() -> ContactDraft { draft("Ada", "Lovelace", "ada@x.com", "1815-12-10") }

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_get_roundtrips() {
  let svc = service().await;
  let mut input = ada();
  input.additional_info = Some(Some("first programmer".into()));

  let created = svc.create(input).await.unwrap();
  assert_eq!(created.first_name, "Ada");
  assert_eq!(created.last_name, "Lovelace");
  assert_eq!(created.email, "ada@x.com");
  assert_eq!(created.phone, "555-0100");
  assert_eq!(created.birthday, date(1815, 12, 10));
  assert_eq!(created.additional_info.as_deref(), Some("first programmer"));

  assert_eq!(svc.get(created.id).await.unwrap(), created);
}

#[tokio::test]
async fn duplicate_email_is_rejected_without_mutation() {
  let svc = service().await;
  svc.create(ada()).await.unwrap();

  let err = svc
    .create(draft("Augusta", "King", "ada@x.com", "1815-12-10"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicateEmail(ref e) if e == "ada@x.com"));

  let all = svc.list(None, None).await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].first_name, "Ada");
}

#[tokio::test]
async fn concurrent_creates_with_same_email_yield_one_winner() {
  let svc = service().await;
  let (a, b) = tokio::join!(
    svc.create(draft("A", "One", "same@x.com", "1990-01-01")),
    svc.create(draft("B", "Two", "same@x.com", "1990-01-01")),
  );

  let outcomes = [a, b];
  assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
  assert!(
    outcomes
      .iter()
      .any(|r| matches!(r, Err(Error::DuplicateEmail(_))))
  );
  assert_eq!(svc.list(None, None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_create_names_fields() {
  let svc = service().await;
  let mut input = ada();
  input.email = Some("nope".into());
  input.phone = None;

  let Error::Validation(errs) = svc.create(input).await.unwrap_err() else {
    panic!("expected a validation error");
  };
  assert!(errs.mentions(Field::Email));
  assert!(errs.mentions(Field::Phone));
  assert!(svc.list(None, None).await.unwrap().is_empty());
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_defaults_to_first_hundred() {
  let svc = service().await;
  for i in 0..105 {
    svc
      .create(draft("P", &format!("{i}"), &format!("p{i}@x.com"), "1990-01-01"))
      .await
      .unwrap();
  }

  assert_eq!(svc.list(None, None).await.unwrap().len(), 100);
  assert_eq!(svc.list(Some(100), None).await.unwrap().len(), 5);
  assert_eq!(svc.list(None, Some(1_000_000)).await.unwrap().len(), 105);
}

// ─── Get / delete ────────────────────────────────────────────────────────────

#[tokio::test]
async fn unknown_ids_are_not_found() {
  let svc = service().await;
  assert!(matches!(svc.get(99).await, Err(Error::NotFound(99))));
  assert!(matches!(svc.update(99, ada()).await, Err(Error::NotFound(99))));
  assert!(matches!(svc.delete(99).await, Err(Error::NotFound(99))));
}

#[tokio::test]
async fn get_after_delete_is_not_found() {
  let svc = service().await;
  let created = svc.create(ada()).await.unwrap();

  svc.delete(created.id).await.unwrap();
  assert!(matches!(svc.get(created.id).await, Err(Error::NotFound(_))));
  assert!(matches!(svc.delete(created.id).await, Err(Error::NotFound(_))));
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_update_is_a_no_op() {
  let svc = service().await;
  let created = svc.create(ada()).await.unwrap();
  let same = svc.update(created.id, ContactDraft::default()).await.unwrap();
  assert_eq!(same, created);
}

#[tokio::test]
async fn full_update_with_current_values_succeeds() {
  let svc = service().await;
  let created = svc.create(ada()).await.unwrap();
  let same = svc.update(created.id, ada()).await.unwrap();
  assert_eq!(same, created);
}

#[tokio::test]
async fn update_changes_only_supplied_fields() {
  let svc = service().await;
  let created = svc.create(ada()).await.unwrap();

  let patch = ContactDraft {
    last_name: Some("King".into()),
    additional_info: Some(Some("Countess of Lovelace".into())),
    ..Default::default()
  };
  let updated = svc.update(created.id, patch).await.unwrap();

  assert_eq!(updated.last_name, "King");
  assert_eq!(updated.additional_info.as_deref(), Some("Countess of Lovelace"));
  assert_eq!(updated.first_name, created.first_name);
  assert_eq!(updated.email, created.email);
  assert_eq!(updated.phone, created.phone);
  assert_eq!(updated.birthday, created.birthday);
  assert_eq!(svc.get(created.id).await.unwrap(), updated);
}

#[tokio::test]
async fn update_validates_supplied_fields() {
  let svc = service().await;
  let created = svc.create(ada()).await.unwrap();

  let patch = ContactDraft { birthday: Some("1815-13-01".into()), ..Default::default() };
  let Error::Validation(errs) = svc.update(created.id, patch).await.unwrap_err() else {
    panic!("expected a validation error");
  };
  assert_eq!(errs.errors.len(), 1);
  assert_eq!(errs.errors[0].field, Field::Birthday);
  assert_eq!(errs.errors[0].problem, Problem::InvalidDate);
  assert_eq!(svc.get(created.id).await.unwrap(), created);
}

#[tokio::test]
async fn update_to_taken_email_is_duplicate() {
  let svc = service().await;
  svc.create(ada()).await.unwrap();
  let grace = svc
    .create(draft("Grace", "Hopper", "grace@navy.mil", "1906-12-09"))
    .await
    .unwrap();

  let patch = ContactDraft { email: Some("ada@x.com".into()), ..Default::default() };
  let err = svc.update(grace.id, patch).await.unwrap_err();
  assert!(matches!(err, Error::DuplicateEmail(ref e) if e == "ada@x.com"));
  assert_eq!(svc.get(grace.id).await.unwrap(), grace);
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn search_matches_names_and_email_case_insensitively() {
  let svc = service().await;
  let ada = svc.create(ada()).await.unwrap();
  svc
    .create(draft("Grace", "Hopper", "grace@navy.mil", "1906-12-09"))
    .await
    .unwrap();

  for text in ["ADA", "love", "x.com"] {
    assert_eq!(svc.search(text).await.unwrap(), vec![ada.clone()], "search {text:?}");
  }
  assert!(svc.search("zzz").await.unwrap().is_empty());
  assert_eq!(svc.search("").await.unwrap().len(), 2);
}

#[tokio::test]
async fn search_does_not_look_at_phone_or_notes() {
  let svc = service().await;
  let mut input = ada();
  input.additional_info = Some(Some("zebra".into()));
  svc.create(input).await.unwrap();

  assert!(svc.search("zebra").await.unwrap().is_empty());
  assert!(svc.search("0100").await.unwrap().is_empty());
}

// ─── Upcoming birthdays ──────────────────────────────────────────────────────

#[tokio::test]
async fn upcoming_birthdays_wrap_the_year() {
  let svc = service().await;
  let jan_2 = svc
    .create(draft("Jan", "Two", "jan2@x.com", "1970-01-02"))
    .await
    .unwrap();
  svc
    .create(draft("Dec", "Twenty", "dec20@x.com", "1988-12-20"))
    .await
    .unwrap();
  let jan_4 = svc
    .create(draft("Jan", "Four", "jan4@x.com", "2003-01-04"))
    .await
    .unwrap();

  let hits = svc.upcoming_birthdays_on(date(2025, 12, 28)).await.unwrap();
  assert_eq!(hits, vec![jan_2, jan_4]);
}

#[tokio::test]
async fn upcoming_birthdays_ignore_birth_year() {
  let svc = service().await;
  let past = svc
    .create(draft("Old", "Timer", "old@x.com", "1930-06-12"))
    .await
    .unwrap();
  let future = svc
    .create(draft("Not", "Yet", "future@x.com", "2090-06-15"))
    .await
    .unwrap();
  svc
    .create(draft("Too", "Late", "late@x.com", "2025-06-18"))
    .await
    .unwrap();

  let hits = svc.upcoming_birthdays_on(date(2025, 6, 10)).await.unwrap();
  assert_eq!(hits, vec![past, future]);
}

#[tokio::test]
async fn upcoming_birthdays_uses_local_today() {
  let svc = service().await;
  let today = chrono::Local::now().date_naive();
  let created = svc
    .create(draft("Birthday", "Today", "today@x.com", &today.to_string()))
    .await
    .unwrap();

  assert_eq!(svc.upcoming_birthdays().await.unwrap(), vec![created]);
}
