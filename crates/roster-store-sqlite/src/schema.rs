//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema version; future migrations will be gated on it.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids of deleted rows from being handed out again.
CREATE TABLE IF NOT EXISTS contacts (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name      TEXT NOT NULL,
    last_name       TEXT NOT NULL,
    email           TEXT NOT NULL UNIQUE,
    phone           TEXT NOT NULL,
    birthday        TEXT NOT NULL,     -- ISO 8601 date, YYYY-MM-DD
    birthday_md     INTEGER NOT NULL,  -- month * 100 + day; recurrence key
    additional_info TEXT
);

CREATE INDEX IF NOT EXISTS contacts_first_name_idx  ON contacts(first_name);
CREATE INDEX IF NOT EXISTS contacts_last_name_idx   ON contacts(last_name);
CREATE INDEX IF NOT EXISTS contacts_birthday_md_idx ON contacts(birthday_md);

PRAGMA user_version = 1;
";
