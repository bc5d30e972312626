//! Integration tests for `SqliteStore` against an in-memory database.

use banter_core::{
  Error as CoreError,
  account::NewAccount,
  comment::NewComment,
  profile::{Gender, ProfileAttrs},
  store::CommunityStore,
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_account(email: &str) -> NewAccount {
  NewAccount {
    email:         email.into(),
    password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".into(),
    profile:       ProfileAttrs {
      name:   "Kim".into(),
      age:    30,
      gender: Gender::new("f"),
      image:  None,
    },
  }
}

// ─── Provisioning ────────────────────────────────────────────────────────────

#[tokio::test]
async fn provision_creates_account_and_profile_together() {
  let s = store().await;

  let account = s.provision_account(new_account("a@x.com")).await.unwrap();
  assert_eq!(account.email, "a@x.com");

  let view = s.account_view(account.account_id).await.unwrap().unwrap();
  assert_eq!(view.account.account_id, account.account_id);
  assert_eq!(view.profile.name, "Kim");
  assert_eq!(view.profile.age, 30);

  assert_eq!(s.count("accounts").await.unwrap(), 1);
  assert_eq!(s.count("profiles").await.unwrap(), 1);
}

#[tokio::test]
async fn provision_normalises_gender_casing() {
  let s = store().await;

  let account = s.provision_account(new_account("a@x.com")).await.unwrap();

  let view = s.account_view(account.account_id).await.unwrap().unwrap();
  assert_eq!(view.profile.gender.as_str(), "F");
}

#[tokio::test]
async fn provision_duplicate_email_conflicts_and_leaves_no_partial_rows() {
  let s = store().await;

  s.provision_account(new_account("a@x.com")).await.unwrap();
  let err = s.provision_account(new_account("a@x.com")).await.unwrap_err();

  assert!(matches!(err, Error::Core(CoreError::DuplicateEmail(_))), "got: {err}");

  // The failed unit must leave nothing behind: one account, one profile.
  assert_eq!(s.count("accounts").await.unwrap(), 1);
  assert_eq!(s.count("profiles").await.unwrap(), 1);
}

#[tokio::test]
async fn account_view_missing_returns_none() {
  let s = store().await;
  assert!(s.account_view(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn find_credentials_returns_hash_for_known_email_only() {
  let s = store().await;
  let account = s.provision_account(new_account("a@x.com")).await.unwrap();

  let creds = s.find_credentials("a@x.com").await.unwrap().unwrap();
  assert_eq!(creds.account_id, account.account_id);
  assert!(creds.password_hash.starts_with("$argon2id$"));

  assert!(s.find_credentials("b@x.com").await.unwrap().is_none());
}

// ─── Rename + ledger ─────────────────────────────────────────────────────────

#[tokio::test]
async fn rename_updates_profile_and_appends_matching_ledger_entry() {
  let s = store().await;
  let account = s.provision_account(new_account("a@x.com")).await.unwrap();

  s.rename_profile(account.account_id, "Lee".into()).await.unwrap();

  let view = s.account_view(account.account_id).await.unwrap().unwrap();
  assert_eq!(view.profile.name, "Lee");

  let history = s.rename_history(account.account_id).await.unwrap();
  assert_eq!(history.len(), 1);
  assert_eq!(history[0].before_name, "Kim");
  assert_eq!(history[0].after_name, "Lee");
  assert_eq!(history[0].account_id, account.account_id);
}

#[tokio::test]
async fn repeated_renames_chain_through_the_ledger() {
  let s = store().await;
  let account = s.provision_account(new_account("a@x.com")).await.unwrap();

  s.rename_profile(account.account_id, "Lee".into()).await.unwrap();
  s.rename_profile(account.account_id, "Park".into()).await.unwrap();

  let history = s.rename_history(account.account_id).await.unwrap();
  assert_eq!(history.len(), 2);
  assert_eq!(history[0].before_name, "Kim");
  assert_eq!(history[0].after_name, "Lee");
  assert_eq!(history[1].before_name, "Lee");
  assert_eq!(history[1].after_name, "Park");
}

#[tokio::test]
async fn rename_without_profile_fails_and_writes_no_ledger_entry() {
  let s = store().await;
  let ghost = Uuid::new_v4();

  let err = s.rename_profile(ghost, "Lee".into()).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::ProfileNotFound(id)) if id == ghost));

  assert_eq!(s.count("rename_ledger").await.unwrap(), 0);
}

// ─── Comments ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_list_comments_newest_first() {
  let s = store().await;
  let author = s.provision_account(new_account("a@x.com")).await.unwrap();
  let post_id = Uuid::new_v4();

  let first = s
    .add_comment(NewComment {
      post_id,
      author_id: author.account_id,
      body: "first".into(),
    })
    .await
    .unwrap();
  let second = s
    .add_comment(NewComment {
      post_id,
      author_id: author.account_id,
      body: "second".into(),
    })
    .await
    .unwrap();

  let listed = s.list_comments(post_id).await.unwrap();
  assert_eq!(listed.len(), 2);
  // Newest first.
  assert_eq!(listed[0].comment_id, second.comment_id);
  assert_eq!(listed[1].comment_id, first.comment_id);
}

#[tokio::test]
async fn list_comments_is_scoped_to_the_post() {
  let s = store().await;
  let author = s.provision_account(new_account("a@x.com")).await.unwrap();

  let post_a = Uuid::new_v4();
  let post_b = Uuid::new_v4();
  s.add_comment(NewComment { post_id: post_a, author_id: author.account_id, body: "on a".into() })
    .await
    .unwrap();

  assert_eq!(s.list_comments(post_a).await.unwrap().len(), 1);
  assert!(s.list_comments(post_b).await.unwrap().is_empty());
}

#[tokio::test]
async fn author_can_update_own_comment() {
  let s = store().await;
  let author = s.provision_account(new_account("a@x.com")).await.unwrap();
  let post_id = Uuid::new_v4();

  let comment = s
    .add_comment(NewComment { post_id, author_id: author.account_id, body: "draft".into() })
    .await
    .unwrap();

  let updated = s
    .update_comment(comment.comment_id, post_id, author.account_id, "final".into())
    .await
    .unwrap();

  assert_eq!(updated.comment_id, comment.comment_id);
  assert_eq!(updated.body, "final");
  assert_eq!(updated.author_id, author.account_id);
}

#[tokio::test]
async fn non_author_update_is_forbidden_and_leaves_body_untouched() {
  let s = store().await;
  let author = s.provision_account(new_account("a@x.com")).await.unwrap();
  let other  = s.provision_account(new_account("b@x.com")).await.unwrap();
  let post_id = Uuid::new_v4();

  let comment = s
    .add_comment(NewComment { post_id, author_id: author.account_id, body: "mine".into() })
    .await
    .unwrap();

  let err = s
    .update_comment(comment.comment_id, post_id, other.account_id, "hijacked".into())
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Core(CoreError::NotCommentAuthor { comment: c, actor })
      if c == comment.comment_id && actor == other.account_id
  ));

  let listed = s.list_comments(post_id).await.unwrap();
  assert_eq!(listed[0].body, "mine");
}

#[tokio::test]
async fn update_against_wrong_post_surfaces_as_stale_write() {
  let s = store().await;
  let author = s.provision_account(new_account("a@x.com")).await.unwrap();
  let post_id = Uuid::new_v4();

  let comment = s
    .add_comment(NewComment { post_id, author_id: author.account_id, body: "here".into() })
    .await
    .unwrap();

  // The ownership read passes, but the scoped write matches zero rows.
  let err = s
    .update_comment(comment.comment_id, Uuid::new_v4(), author.account_id, "moved".into())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::StaleWrite(id)) if id == comment.comment_id));

  let listed = s.list_comments(post_id).await.unwrap();
  assert_eq!(listed[0].body, "here");
}

#[tokio::test]
async fn update_missing_comment_returns_not_found() {
  let s = store().await;
  let actor = Uuid::new_v4();
  let ghost = Uuid::new_v4();

  let err = s
    .update_comment(ghost, Uuid::new_v4(), actor, "anything".into())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::CommentNotFound(id)) if id == ghost));
}

#[tokio::test]
async fn author_can_delete_and_the_comment_is_gone() {
  let s = store().await;
  let author = s.provision_account(new_account("a@x.com")).await.unwrap();
  let post_id = Uuid::new_v4();

  let comment = s
    .add_comment(NewComment { post_id, author_id: author.account_id, body: "bye".into() })
    .await
    .unwrap();

  s.delete_comment(comment.comment_id, author.account_id).await.unwrap();

  assert!(s.list_comments(post_id).await.unwrap().is_empty());

  // A second delete now sees nothing.
  let err = s
    .delete_comment(comment.comment_id, author.account_id)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::CommentNotFound(_))));
}

#[tokio::test]
async fn non_author_delete_is_forbidden_and_the_comment_survives() {
  let s = store().await;
  let author = s.provision_account(new_account("a@x.com")).await.unwrap();
  let other  = s.provision_account(new_account("b@x.com")).await.unwrap();
  let post_id = Uuid::new_v4();

  let comment = s
    .add_comment(NewComment { post_id, author_id: author.account_id, body: "staying".into() })
    .await
    .unwrap();

  let err = s
    .delete_comment(comment.comment_id, other.account_id)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::NotCommentAuthor { .. })));

  assert_eq!(s.list_comments(post_id).await.unwrap().len(), 1);
}
