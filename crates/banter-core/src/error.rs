//! Error types for `banter-core`.
//!
//! Every failure a store can produce collapses into one of four outcome
//! classes — conflict, not-found, forbidden, persistence — so callers can
//! pick a response without inspecting error text.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// The account natural key is already taken. Raised by the store's
  /// uniqueness constraint, not by an application-level check.
  #[error("email already registered: {0}")]
  DuplicateEmail(String),

  #[error("account not found: {0}")]
  AccountNotFound(Uuid),

  #[error("no profile for account: {0}")]
  ProfileNotFound(Uuid),

  #[error("comment not found: {0}")]
  CommentNotFound(Uuid),

  /// The actor is not the recorded author of the comment.
  #[error("account {actor} is not the author of comment {comment}")]
  NotCommentAuthor { comment: Uuid, actor: Uuid },

  /// An owner-scoped write matched zero rows: the row changed between the
  /// ownership read and the write. Never reported as success.
  #[error("comment {0} was modified by a concurrent writer")]
  StaleWrite(Uuid),

  /// The backend failed for a reason that is not a business-rule violation.
  /// The atomic unit it occurred in has already been rolled back.
  #[error("storage error: {0}")]
  Storage(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
