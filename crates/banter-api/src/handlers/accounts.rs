//! Handlers for account endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/users` | Sign up; account + profile in one unit |
//! | `POST` | `/login` | Issue a bearer token |
//! | `GET`  | `/users/:id` | Credential-free account view |
//! | `PUT`  | `/users/name` | Rename own profile; ledgered |
//! | `GET`  | `/users/name/history` | Own rename ledger, oldest first |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use banter_core::{
  account::NewAccount,
  ledger::RenameAuditEntry,
  profile::{Gender, ProfileAttrs},
  store::{AccountView, CommunityStore},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  AppState,
  auth::{self, CurrentAccount},
  error::ApiError,
};

// ─── Sign-up ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SignUpBody {
  pub email:    String,
  pub password: String,
  pub name:     String,
  pub age:      u32,
  pub gender:   String,
  pub image:    Option<String>,
}

/// `POST /users` — provision an account and its profile as one atomic unit.
///
/// The response carries the credential-free [`banter_core::account::Account`].
pub async fn sign_up<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<SignUpBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CommunityStore + Clone + Send + Sync + 'static,
{
  if body.email.trim().is_empty() || body.password.is_empty() {
    return Err(ApiError::BadRequest("email and password are required".to_string()));
  }

  let password_hash = auth::hash_password(&body.password)?;

  let account = state
    .store
    .provision_account(NewAccount {
      email: body.email,
      password_hash,
      profile: ProfileAttrs {
        name:   body.name,
        age:    body.age,
        gender: Gender::new(&body.gender),
        image:  body.image,
      },
    })
    .await
    .map_err(ApiError::from_store)?;

  Ok((StatusCode::CREATED, Json(account)))
}

// ─── Login ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LogInBody {
  pub email:    String,
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenBody {
  pub token: String,
}

/// `POST /login` — verify credentials and mint a session token.
///
/// Unknown email and wrong password produce the same 401.
pub async fn log_in<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LogInBody>,
) -> Result<Json<TokenBody>, ApiError>
where
  S: CommunityStore + Clone + Send + Sync + 'static,
{
  let creds = state
    .store
    .find_credentials(&body.email)
    .await
    .map_err(ApiError::from_store)?
    .ok_or(ApiError::Unauthorized)?;

  if !auth::verify_password(&body.password, &creds.password_hash) {
    return Err(ApiError::Unauthorized);
  }

  let token = state.sessions.issue(creds.account_id);
  Ok(Json(TokenBody { token }))
}

// ─── Read ────────────────────────────────────────────────────────────────────

/// `GET /users/:id` — account and profile, readable by anyone.
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<AccountView>, ApiError>
where
  S: CommunityStore + Clone + Send + Sync + 'static,
{
  let view = state
    .store
    .account_view(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("account {id} not found")))?;
  Ok(Json(view))
}

// ─── Rename ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RenameBody {
  pub name: String,
}

/// `PUT /users/name` — rename the authenticated account's profile.
pub async fn rename<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account_id): CurrentAccount,
  Json(body): Json<RenameBody>,
) -> Result<StatusCode, ApiError>
where
  S: CommunityStore + Clone + Send + Sync + 'static,
{
  if body.name.trim().is_empty() {
    return Err(ApiError::BadRequest("name must not be empty".to_string()));
  }

  state
    .store
    .rename_profile(account_id, body.name)
    .await
    .map_err(ApiError::from_store)?;

  Ok(StatusCode::NO_CONTENT)
}

/// `GET /users/name/history` — the authenticated account's rename ledger.
pub async fn rename_history<S>(
  State(state): State<AppState<S>>,
  CurrentAccount(account_id): CurrentAccount,
) -> Result<Json<Vec<RenameAuditEntry>>, ApiError>
where
  S: CommunityStore + Clone + Send + Sync + 'static,
{
  let history = state
    .store
    .rename_history(account_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(history))
}
