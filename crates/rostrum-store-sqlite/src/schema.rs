//! SQL schema for the Rostrum SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id       TEXT PRIMARY KEY,
    email         TEXT NOT NULL UNIQUE,
    name          TEXT NOT NULL,
    password_hash TEXT,             -- argon2 PHC string; NULL for externally provisioned accounts
    role          TEXT NOT NULL DEFAULT 'attendee',  -- 'attendee' | 'speaker' | 'organizer'
    bio           TEXT,
    created_at    TEXT NOT NULL     -- ISO 8601 UTC; store-assigned
);

CREATE TABLE IF NOT EXISTS talks (
    talk_id          TEXT PRIMARY KEY,
    title            TEXT NOT NULL,
    abstract         TEXT NOT NULL,
    speaker_id       TEXT NOT NULL,  -- owner's subject id; never updated
    status           TEXT NOT NULL DEFAULT 'pending',  -- 'pending' | 'approved' | 'rejected'
    duration_minutes INTEGER,
    notes            TEXT,
    created_at       TEXT NOT NULL,  -- ISO 8601 UTC; store-assigned
    updated_at       TEXT NOT NULL   -- doubles as the revision for guarded writes
);

CREATE INDEX IF NOT EXISTS talks_speaker_idx ON talks(speaker_id);
CREATE INDEX IF NOT EXISTS talks_status_idx  ON talks(status);

PRAGMA user_version = 1;
";
