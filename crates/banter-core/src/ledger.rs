//! Rename ledger — append-only audit records for profile renames.
//!
//! An entry is written in the same atomic unit as the rename it documents,
//! so a renamed profile and its ledger entry are never observable apart.
//! Entries are never updated or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Records that a profile's name changed. One entry per successful rename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameAuditEntry {
  pub entry_id:    Uuid,
  pub account_id:  Uuid,
  pub before_name: String,
  pub after_name:  String,
  /// Server-assigned timestamp; never changes after creation.
  pub recorded_at: DateTime<Utc>,
}
