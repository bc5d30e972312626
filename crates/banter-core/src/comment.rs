//! Comment — a post-scoped remark owned by the account that wrote it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A comment under a post.
///
/// `post_id` and `author_id` are fixed at creation. Anyone may read a
/// comment; only its author may change `body` or delete it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
  pub comment_id: Uuid,
  /// The parent post. Posts live outside this store; the id is opaque here.
  pub post_id:    Uuid,
  pub author_id:  Uuid,
  pub body:       String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Input to [`crate::store::CommunityStore::add_comment`].
/// The id and both timestamps are set by the store.
#[derive(Debug, Clone)]
pub struct NewComment {
  pub post_id:   Uuid,
  pub author_id: Uuid,
  pub body:      String,
}
