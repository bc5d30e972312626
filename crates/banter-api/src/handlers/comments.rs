//! Handlers for comment endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/posts/:post_id/comments` | Newest first; no auth |
//! | `POST`   | `/posts/:post_id/comments` | Author is the authenticated account |
//! | `PUT`    | `/posts/:post_id/comments/:comment_id` | Author only |
//! | `DELETE` | `/comments/:comment_id` | Author only |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use banter_core::{
  comment::{Comment, NewComment},
  store::CommunityStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, auth::CurrentAccount, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct CommentBody {
  pub body: String,
}

/// `GET /posts/:post_id/comments` — comments under a post, newest first.
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Path(post_id): Path<Uuid>,
) -> Result<Json<Vec<Comment>>, ApiError>
where
  S: CommunityStore + Clone + Send + Sync + 'static,
{
  let comments = state
    .store
    .list_comments(post_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(comments))
}

/// `POST /posts/:post_id/comments` — create a comment owned by the actor.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(author_id): CurrentAccount,
  Path(post_id): Path<Uuid>,
  Json(body): Json<CommentBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CommunityStore + Clone + Send + Sync + 'static,
{
  if body.body.trim().is_empty() {
    return Err(ApiError::BadRequest("comment body must not be empty".to_string()));
  }

  let comment = state
    .store
    .add_comment(NewComment { post_id, author_id, body: body.body })
    .await
    .map_err(ApiError::from_store)?;

  Ok((StatusCode::CREATED, Json(comment)))
}

/// `PUT /posts/:post_id/comments/:comment_id` — replace the body, author only.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(actor): CurrentAccount,
  Path((post_id, comment_id)): Path<(Uuid, Uuid)>,
  Json(body): Json<CommentBody>,
) -> Result<Json<Comment>, ApiError>
where
  S: CommunityStore + Clone + Send + Sync + 'static,
{
  if body.body.trim().is_empty() {
    return Err(ApiError::BadRequest("comment body must not be empty".to_string()));
  }

  let updated = state
    .store
    .update_comment(comment_id, post_id, actor, body.body)
    .await
    .map_err(ApiError::from_store)?;

  Ok(Json(updated))
}

/// `DELETE /comments/:comment_id` — remove the comment, author only.
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(actor): CurrentAccount,
  Path(comment_id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: CommunityStore + Clone + Send + Sync + 'static,
{
  state
    .store
    .delete_comment(comment_id, actor)
    .await
    .map_err(ApiError::from_store)?;

  Ok(StatusCode::NO_CONTENT)
}
