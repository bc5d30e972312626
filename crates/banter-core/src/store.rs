//! The `CommunityStore` trait and supporting read models.
//!
//! The trait is implemented by storage backends (e.g. `banter-store-sqlite`).
//! The API layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  account::{Account, NewAccount, StoredCredentials},
  comment::{Comment, NewComment},
  ledger::RenameAuditEntry,
  profile::Profile,
};

// ─── Read models ─────────────────────────────────────────────────────────────

/// An account joined with its profile — the computed, credential-free read
/// model served to anyone who asks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountView {
  pub account: Account,
  pub profile: Profile,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a banter storage backend.
///
/// Multi-write operations (`provision_account`, `rename_profile`) commit or
/// roll back as one atomic unit before their future resolves; the store never
/// partially commits. Owner-gated operations (`update_comment`,
/// `delete_comment`) verify authorship before writing and scope the write
/// itself by owner.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`). The associated
/// error converts into [`crate::Error`] so callers can classify failures.
pub trait CommunityStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  // ── Accounts ──────────────────────────────────────────────────────────

  /// Create an account and its profile as one atomic unit.
  ///
  /// A duplicate email fails with [`crate::Error::DuplicateEmail`]; on any
  /// failure inside the unit neither row persists.
  fn provision_account(
    &self,
    input: NewAccount,
  ) -> impl Future<Output = Result<Account, Self::Error>> + Send + '_;

  /// Look up the credential hash for a login attempt.
  /// Returns `None` if no account carries this email.
  fn find_credentials<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<StoredCredentials>, Self::Error>> + Send + 'a;

  /// Materialise the account + profile read model.
  /// Returns `None` if the account does not exist.
  fn account_view(
    &self,
    account_id: Uuid,
  ) -> impl Future<Output = Result<Option<AccountView>, Self::Error>> + Send + '_;

  // ── Identity rename ───────────────────────────────────────────────────

  /// Rename the profile and append a ledger entry as one atomic unit.
  ///
  /// Both writes succeed or both are rolled back; commit completes before
  /// the future resolves. Fails with [`crate::Error::ProfileNotFound`] if
  /// the account has no profile.
  fn rename_profile(
    &self,
    account_id: Uuid,
    new_name: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// All rename ledger entries for an account, oldest first.
  fn rename_history(
    &self,
    account_id: Uuid,
  ) -> impl Future<Output = Result<Vec<RenameAuditEntry>, Self::Error>> + Send + '_;

  // ── Comments ──────────────────────────────────────────────────────────

  /// Persist a new comment owned by `input.author_id`.
  fn add_comment(
    &self,
    input: NewComment,
  ) -> impl Future<Output = Result<Comment, Self::Error>> + Send + '_;

  /// All comments under a post, newest first.
  fn list_comments(
    &self,
    post_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Comment>, Self::Error>> + Send + '_;

  /// Replace a comment's body, provided `actor` is its author.
  ///
  /// The write is scoped by `(comment_id, author_id, post_id)`; if it
  /// matches zero rows the operation fails with
  /// [`crate::Error::StaleWrite`] rather than reporting success.
  fn update_comment(
    &self,
    comment_id: Uuid,
    post_id: Uuid,
    actor: Uuid,
    body: String,
  ) -> impl Future<Output = Result<Comment, Self::Error>> + Send + '_;

  /// Delete a comment, provided `actor` is its author.
  /// Scoped by `(comment_id, author_id)` with the same zero-rows rule as
  /// [`CommunityStore::update_comment`].
  fn delete_comment(
    &self,
    comment_id: Uuid,
    actor: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
