//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. UUIDs are stored as
//! hyphenated lowercase strings. Gender is stored as its canonical uppercase
//! form.

use banter_core::{
  account::Account,
  comment::Comment,
  ledger::RenameAuditEntry,
  profile::{Gender, Profile},
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Raw row types ───────────────────────────────────────────────────────────

/// An `accounts` row as read from SQLite, before decoding.
pub struct RawAccount {
  pub account_id: String,
  pub email:      String,
  pub created_at: String,
}

impl RawAccount {
  pub fn into_account(self) -> Result<Account> {
    Ok(Account {
      account_id: decode_uuid(&self.account_id)?,
      email:      self.email,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// A `profiles` row as read from SQLite, before decoding.
pub struct RawProfile {
  pub account_id: String,
  pub name:       String,
  pub age:        u32,
  pub gender:     String,
  pub image:      Option<String>,
}

impl RawProfile {
  pub fn into_profile(self) -> Result<Profile> {
    Ok(Profile {
      account_id: decode_uuid(&self.account_id)?,
      name:       self.name,
      age:        self.age,
      gender:     Gender::new(&self.gender),
      image:      self.image,
    })
  }
}

/// A `rename_ledger` row as read from SQLite, before decoding.
pub struct RawLedgerEntry {
  pub entry_id:    String,
  pub account_id:  String,
  pub before_name: String,
  pub after_name:  String,
  pub recorded_at: String,
}

impl RawLedgerEntry {
  pub fn into_entry(self) -> Result<RenameAuditEntry> {
    Ok(RenameAuditEntry {
      entry_id:    decode_uuid(&self.entry_id)?,
      account_id:  decode_uuid(&self.account_id)?,
      before_name: self.before_name,
      after_name:  self.after_name,
      recorded_at: decode_dt(&self.recorded_at)?,
    })
  }
}

/// A `comments` row as read from SQLite, before decoding.
pub struct RawComment {
  pub comment_id: String,
  pub post_id:    String,
  pub author_id:  String,
  pub body:       String,
  pub created_at: String,
  pub updated_at: String,
}

impl RawComment {
  pub fn into_comment(self) -> Result<Comment> {
    Ok(Comment {
      comment_id: decode_uuid(&self.comment_id)?,
      post_id:    decode_uuid(&self.post_id)?,
      author_id:  decode_uuid(&self.author_id)?,
      body:       self.body,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
