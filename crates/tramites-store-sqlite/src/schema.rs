//! SQL schema for the trámites SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- The three catalogs share one shape.
CREATE TABLE IF NOT EXISTS countries (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS case_types (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS statuses (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL
);

-- Cases are never updated or deleted.
CREATE TABLE IF NOT EXISTS cases (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    primary_subject    TEXT NOT NULL,
    secondary_subject  TEXT NOT NULL DEFAULT '',
    received_date      TEXT NOT NULL,   -- YYYY-MM-DD
    due_date           TEXT NOT NULL,   -- YYYY-MM-DD; computed at insert
    case_type_id       INTEGER NOT NULL REFERENCES case_types(id),
    country_id         INTEGER NOT NULL REFERENCES countries(id),
    status_id          INTEGER NOT NULL REFERENCES statuses(id),
    notes              TEXT NOT NULL DEFAULT '',
    parent_id          INTEGER REFERENCES cases(id)
);

CREATE TABLE IF NOT EXISTS follow_ups (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    case_id         INTEGER NOT NULL REFERENCES cases(id),
    follow_up_date  TEXT NOT NULL,      -- YYYY-MM-DD
    annotation      TEXT NOT NULL DEFAULT '',
    recorded_at     TEXT NOT NULL       -- RFC 3339 UTC; store-assigned
);

CREATE INDEX IF NOT EXISTS cases_parent_idx    ON cases(parent_id);
CREATE INDEX IF NOT EXISTS follow_ups_case_idx ON follow_ups(case_id);

PRAGMA user_version = 1;
";
