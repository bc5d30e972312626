//! Account — the identity that owns a profile and authors comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::ProfileAttrs;

/// A registered account. Carries identity metadata only — the credential
/// hash never travels with it, so an `Account` is always safe to serialise
/// into a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
  pub account_id: Uuid,
  pub email:      String,
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::CommunityStore::provision_account`].
///
/// The account and its profile are created together in one atomic unit;
/// neither ever exists without the other.
#[derive(Debug, Clone)]
pub struct NewAccount {
  /// The caller-supplied natural key. Uniqueness is enforced by the store.
  pub email:         String,
  /// PHC string produced by the caller; the store never sees a raw password.
  pub password_hash: String,
  pub profile:       ProfileAttrs,
}

/// Login-path lookup value returned by
/// [`crate::store::CommunityStore::find_credentials`].
///
/// Not `Serialize`: the hash reaches the password verifier and nothing else.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
  pub account_id:    Uuid,
  pub password_hash: String,
}
