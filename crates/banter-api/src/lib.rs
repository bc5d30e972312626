//! JSON REST layer for the banter community backend.
//!
//! Exposes an axum [`Router`] backed by any
//! [`CommunityStore`](banter_core::store::CommunityStore). Session tokens are
//! verified here: handlers receive an already-verified account id, and the
//! store layer never sees a token or a raw password.

pub mod auth;
pub mod error;
pub mod handlers;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use banter_core::store::CommunityStore;
use serde::Deserialize;

use auth::SessionRegistry;
use handlers::{accounts, comments};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: CommunityStore> {
  pub store:    Arc<S>,
  pub sessions: Arc<SessionRegistry>,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the banter API.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CommunityStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/users", post(accounts::sign_up::<S>))
    .route("/login", post(accounts::log_in::<S>))
    .route("/users/name", put(accounts::rename::<S>))
    .route("/users/name/history", get(accounts::rename_history::<S>))
    .route("/users/{id}", get(accounts::get_one::<S>))
    .route(
      "/posts/{post_id}/comments",
      get(comments::list::<S>).post(comments::create::<S>),
    )
    .route(
      "/posts/{post_id}/comments/{comment_id}",
      put(comments::update::<S>),
    )
    .route("/comments/{comment_id}", delete(comments::remove::<S>))
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────
