//! Bearer-token sessions and the authenticated-account extractor.
//!
//! Tokens are opaque: minted from the OS RNG, handed to the client once, and
//! held here only as SHA-256 digests. Handlers that take [`CurrentAccount`]
//! receive the account id a valid token proved — the store layer never sees
//! a token or a raw password.

use std::{
  collections::HashMap,
  sync::{PoisonError, RwLock},
};

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use rand_core::{OsRng, RngCore as _};
use sha2::{Digest as _, Sha256};
use uuid::Uuid;

use crate::{AppState, error::ApiError};
use banter_core::store::CommunityStore;

// ─── Passwords ───────────────────────────────────────────────────────────────

/// Hash a raw password into an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| ApiError::Internal(format!("argon2 error: {e}")))
}

/// Verify a raw password against a stored PHC string.
pub fn verify_password(password: &str, phc: &str) -> bool {
  PasswordHash::new(phc)
    .map(|parsed| {
      Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
    })
    .unwrap_or(false)
}

// ─── Session registry ────────────────────────────────────────────────────────

/// In-process session table: token digest → account id.
#[derive(Default)]
pub struct SessionRegistry {
  inner: RwLock<HashMap<[u8; 32], Uuid>>,
}

fn digest_of(token: &str) -> [u8; 32] { Sha256::digest(token.as_bytes()).into() }

impl SessionRegistry {
  pub fn new() -> Self { Self::default() }

  /// Mint a fresh token for `account_id` and return it (64 hex chars).
  /// Only the token's digest is retained.
  pub fn issue(&self, account_id: Uuid) -> String {
    let mut raw = [0u8; 32];
    OsRng.fill_bytes(&mut raw);
    let token = hex::encode(raw);
    self
      .inner
      .write()
      .unwrap_or_else(PoisonError::into_inner)
      .insert(digest_of(&token), account_id);
    token
  }

  /// Resolve a presented token to the account it was issued for.
  pub fn resolve(&self, token: &str) -> Option<Uuid> {
    self
      .inner
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .get(&digest_of(token))
      .copied()
  }
}

// ─── Extractor ───────────────────────────────────────────────────────────────

/// Present in a handler's signature means the request carried a valid bearer
/// token; the wrapped id is the verified actor identity.
pub struct CurrentAccount(pub Uuid);

fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
  headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .ok_or(ApiError::Unauthorized)
}

impl<S> FromRequestParts<AppState<S>> for CurrentAccount
where
  S: CommunityStore + Clone + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = bearer_token(&parts.headers)?;
    let account_id = state.sessions.resolve(token).ok_or(ApiError::Unauthorized)?;
    Ok(Self(account_id))
  }
}
