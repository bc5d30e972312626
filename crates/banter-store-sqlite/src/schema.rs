//! SQL schema for the banter SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Email uniqueness lives here, not in application code; the pre-check in
-- the store is advisory only.
CREATE TABLE IF NOT EXISTS accounts (
    account_id    TEXT PRIMARY KEY,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,   -- argon2 PHC string
    created_at    TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

-- Exactly one row per account, inserted in the same transaction as the
-- account row it references.
CREATE TABLE IF NOT EXISTS profiles (
    account_id TEXT PRIMARY KEY REFERENCES accounts(account_id),
    name       TEXT NOT NULL,
    age        INTEGER NOT NULL,
    gender     TEXT NOT NULL,      -- canonical uppercase category
    image      TEXT
);

-- The rename ledger is strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS rename_ledger (
    entry_id    TEXT PRIMARY KEY,
    account_id  TEXT NOT NULL REFERENCES accounts(account_id),
    before_name TEXT NOT NULL,
    after_name  TEXT NOT NULL,
    recorded_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS comments (
    comment_id TEXT PRIMARY KEY,
    post_id    TEXT NOT NULL,      -- parent post lives outside this store
    author_id  TEXT NOT NULL REFERENCES accounts(account_id),
    body       TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS comments_post_idx  ON comments(post_id);
CREATE INDEX IF NOT EXISTS ledger_account_idx ON rename_ledger(account_id);

PRAGMA user_version = 1;
";
