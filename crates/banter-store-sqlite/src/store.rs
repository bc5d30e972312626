//! [`SqliteStore`] — the SQLite implementation of [`CommunityStore`].
//!
//! Every multi-write operation runs inside one
//! [`rusqlite::TransactionBehavior::Immediate`] transaction on the dedicated
//! connection thread. The immediate lock serialises writers up front, and
//! SQLite transactions are serialisable, which is stricter than the
//! read-committed floor the rename path requires. Commit is explicit;
//! dropping an uncommitted transaction rolls back, so every early return
//! leaves no trace.

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, TransactionBehavior};
use uuid::Uuid;

use banter_core::{
  account::{Account, NewAccount, StoredCredentials},
  comment::{Comment, NewComment},
  ledger::RenameAuditEntry,
  store::{AccountView, CommunityStore},
};

use crate::{
  encode::{RawAccount, RawComment, RawLedgerEntry, RawProfile, decode_uuid, encode_dt, encode_uuid},
  schema::SCHEMA,
  Error, Result,
};

type CoreError = banter_core::Error;

/// True when `err` is a UNIQUE-constraint violation.
fn is_unique_violation(err: &rusqlite::Error) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(e, _)
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A banter community store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All access
/// is funnelled through that connection, so the database's own transaction
/// machinery is the only concurrency-control boundary; the store holds no
/// in-process lock across requests.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Row count for a table — test support.
  #[cfg(test)]
  pub(crate) async fn count(&self, table: &'static str) -> Result<u64> {
    let n: u64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?)
      })
      .await?;
    Ok(n)
  }
}

// ─── CommunityStore impl ─────────────────────────────────────────────────────

impl CommunityStore for SqliteStore {
  type Error = Error;

  // ── Accounts ──────────────────────────────────────────────────────────────

  async fn provision_account(&self, input: NewAccount) -> Result<Account> {
    let account = Account {
      account_id: Uuid::new_v4(),
      email:      input.email.clone(),
      created_at: Utc::now(),
    };

    let id_str  = encode_uuid(account.account_id);
    let at_str  = encode_dt(account.created_at);
    let email   = input.email;
    let hash    = input.password_hash;
    let profile = input.profile;

    let outcome: std::result::Result<(), CoreError> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        // Advisory pre-check; the UNIQUE constraint below is the real guard
        // against a concurrent insert of the same email.
        let taken = tx
          .query_row(
            "SELECT 1 FROM accounts WHERE email = ?1",
            rusqlite::params![email],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if taken {
          return Ok(Err(CoreError::DuplicateEmail(email)));
        }

        match tx.execute(
          "INSERT INTO accounts (account_id, email, password_hash, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, email, hash, at_str],
        ) {
          Ok(_) => {}
          Err(e) if is_unique_violation(&e) => {
            return Ok(Err(CoreError::DuplicateEmail(email)));
          }
          Err(e) => return Err(e.into()),
        }

        tx.execute(
          "INSERT INTO profiles (account_id, name, age, gender, image)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            id_str,
            profile.name,
            profile.age,
            profile.gender.as_str(),
            profile.image,
          ],
        )?;

        tx.commit()?;
        Ok(Ok(()))
      })
      .await?;

    outcome.map_err(Error::Core)?;
    Ok(account)
  }

  async fn find_credentials(&self, email: &str) -> Result<Option<StoredCredentials>> {
    let email = email.to_owned();

    let raw: Option<(String, String)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT account_id, password_hash FROM accounts WHERE email = ?1",
              rusqlite::params![email],
              |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?,
        )
      })
      .await?;

    raw
      .map(|(id_str, password_hash)| {
        Ok(StoredCredentials { account_id: decode_uuid(&id_str)?, password_hash })
      })
      .transpose()
  }

  async fn account_view(&self, account_id: Uuid) -> Result<Option<AccountView>> {
    let id_str = encode_uuid(account_id);

    let raw: Option<(RawAccount, RawProfile)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT a.account_id, a.email, a.created_at,
                      p.name, p.age, p.gender, p.image
               FROM accounts a
               JOIN profiles p ON p.account_id = a.account_id
               WHERE a.account_id = ?1",
              rusqlite::params![id_str],
              |row| {
                Ok((
                  RawAccount {
                    account_id: row.get(0)?,
                    email:      row.get(1)?,
                    created_at: row.get(2)?,
                  },
                  RawProfile {
                    account_id: row.get(0)?,
                    name:       row.get(3)?,
                    age:        row.get(4)?,
                    gender:     row.get(5)?,
                    image:      row.get(6)?,
                  },
                ))
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw
      .map(|(a, p)| {
        Ok(AccountView { account: a.into_account()?, profile: p.into_profile()? })
      })
      .transpose()
  }

  // ── Identity rename ───────────────────────────────────────────────────────

  async fn rename_profile(&self, account_id: Uuid, new_name: String) -> Result<()> {
    let entry_id = Uuid::new_v4();
    let now      = Utc::now();

    let id_str       = encode_uuid(account_id);
    let entry_id_str = encode_uuid(entry_id);
    let at_str       = encode_dt(now);

    let outcome: std::result::Result<(), CoreError> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let before: Option<String> = tx
          .query_row(
            "SELECT name FROM profiles WHERE account_id = ?1",
            rusqlite::params![id_str],
            |row| row.get(0),
          )
          .optional()?;
        let Some(before) = before else {
          return Ok(Err(CoreError::ProfileNotFound(account_id)));
        };

        // The profile update and the ledger append are one unit: a reader
        // can never observe one without the other.
        tx.execute(
          "UPDATE profiles SET name = ?2 WHERE account_id = ?1",
          rusqlite::params![id_str, new_name],
        )?;
        tx.execute(
          "INSERT INTO rename_ledger (entry_id, account_id, before_name, after_name, recorded_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![entry_id_str, id_str, before, new_name, at_str],
        )?;

        tx.commit()?;
        Ok(Ok(()))
      })
      .await?;

    outcome.map_err(Error::Core)
  }

  async fn rename_history(&self, account_id: Uuid) -> Result<Vec<RenameAuditEntry>> {
    let id_str = encode_uuid(account_id);

    let raws: Vec<RawLedgerEntry> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT entry_id, account_id, before_name, after_name, recorded_at
           FROM rename_ledger
           WHERE account_id = ?1
           ORDER BY recorded_at ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| {
            Ok(RawLedgerEntry {
              entry_id:    row.get(0)?,
              account_id:  row.get(1)?,
              before_name: row.get(2)?,
              after_name:  row.get(3)?,
              recorded_at: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLedgerEntry::into_entry).collect()
  }

  // ── Comments ──────────────────────────────────────────────────────────────

  async fn add_comment(&self, input: NewComment) -> Result<Comment> {
    let now = Utc::now();
    let comment = Comment {
      comment_id: Uuid::new_v4(),
      post_id:    input.post_id,
      author_id:  input.author_id,
      body:       input.body,
      created_at: now,
      updated_at: now,
    };

    let comment_id_str = encode_uuid(comment.comment_id);
    let post_id_str    = encode_uuid(comment.post_id);
    let author_id_str  = encode_uuid(comment.author_id);
    let body           = comment.body.clone();
    let at_str         = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO comments (comment_id, post_id, author_id, body, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![comment_id_str, post_id_str, author_id_str, body, at_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(comment)
  }

  async fn list_comments(&self, post_id: Uuid) -> Result<Vec<Comment>> {
    let post_id_str = encode_uuid(post_id);

    let raws: Vec<RawComment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT comment_id, post_id, author_id, body, created_at, updated_at
           FROM comments
           WHERE post_id = ?1
           ORDER BY created_at DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![post_id_str], |row| {
            Ok(RawComment {
              comment_id: row.get(0)?,
              post_id:    row.get(1)?,
              author_id:  row.get(2)?,
              body:       row.get(3)?,
              created_at: row.get(4)?,
              updated_at: row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawComment::into_comment).collect()
  }

  async fn update_comment(
    &self,
    comment_id: Uuid,
    post_id:    Uuid,
    actor:      Uuid,
    body:       String,
  ) -> Result<Comment> {
    let now = Utc::now();

    let comment_id_str = encode_uuid(comment_id);
    let post_id_str    = encode_uuid(post_id);
    let actor_str      = encode_uuid(actor);
    let at_str         = encode_dt(now);

    let outcome: std::result::Result<RawComment, CoreError> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let author: Option<String> = tx
          .query_row(
            "SELECT author_id FROM comments WHERE comment_id = ?1",
            rusqlite::params![comment_id_str],
            |row| row.get(0),
          )
          .optional()?;
        let Some(author) = author else {
          return Ok(Err(CoreError::CommentNotFound(comment_id)));
        };
        if author != actor_str {
          return Ok(Err(CoreError::NotCommentAuthor { comment: comment_id, actor }));
        }

        // The write itself is scoped by author and post as well as id, so a
        // row that changed hands after the read above is skipped, not
        // clobbered.
        let affected = tx.execute(
          "UPDATE comments SET body = ?4, updated_at = ?5
           WHERE comment_id = ?1 AND author_id = ?2 AND post_id = ?3",
          rusqlite::params![comment_id_str, actor_str, post_id_str, body, at_str],
        )?;
        if affected == 0 {
          return Ok(Err(CoreError::StaleWrite(comment_id)));
        }

        let raw = tx.query_row(
          "SELECT comment_id, post_id, author_id, body, created_at, updated_at
           FROM comments WHERE comment_id = ?1",
          rusqlite::params![comment_id_str],
          |row| {
            Ok(RawComment {
              comment_id: row.get(0)?,
              post_id:    row.get(1)?,
              author_id:  row.get(2)?,
              body:       row.get(3)?,
              created_at: row.get(4)?,
              updated_at: row.get(5)?,
            })
          },
        )?;

        tx.commit()?;
        Ok(Ok(raw))
      })
      .await?;

    outcome.map_err(Error::Core)?.into_comment()
  }

  async fn delete_comment(&self, comment_id: Uuid, actor: Uuid) -> Result<()> {
    let comment_id_str = encode_uuid(comment_id);
    let actor_str      = encode_uuid(actor);

    let outcome: std::result::Result<(), CoreError> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let author: Option<String> = tx
          .query_row(
            "SELECT author_id FROM comments WHERE comment_id = ?1",
            rusqlite::params![comment_id_str],
            |row| row.get(0),
          )
          .optional()?;
        let Some(author) = author else {
          return Ok(Err(CoreError::CommentNotFound(comment_id)));
        };
        if author != actor_str {
          return Ok(Err(CoreError::NotCommentAuthor { comment: comment_id, actor }));
        }

        let affected = tx.execute(
          "DELETE FROM comments WHERE comment_id = ?1 AND author_id = ?2",
          rusqlite::params![comment_id_str, actor_str],
        )?;
        if affected == 0 {
          return Ok(Err(CoreError::StaleWrite(comment_id)));
        }

        tx.commit()?;
        Ok(Ok(()))
      })
      .await?;

    outcome.map_err(Error::Core)
  }
}
