//! Handlers for `/api/auth` endpoints: signup, login, me.
//!
//! This is the only place passwords are seen in the clear and the only
//! place tokens are minted. Everything downstream trusts the claims inside
//! the token for its validity window.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use rand_core::OsRng;
use rostrum_core::{
  account::{NewUser, User},
  identity::{Identity, Role},
  store::{AccountStore, TalkStore},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, auth::Auth, error::ApiError};

fn store_err(e: impl std::error::Error + Send + Sync + 'static) -> ApiError {
  ApiError::Store(Box::new(e))
}

// ─── Signup ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SignupBody {
  #[serde(default)]
  pub name:     String,
  #[serde(default)]
  pub email:    String,
  #[serde(default)]
  pub password: String,
  /// Defaults to attendee when omitted.
  pub role:     Option<Role>,
  pub bio:      Option<String>,
}

/// `POST /api/auth/signup`
pub async fn signup<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<SignupBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TalkStore + AccountStore + 'static,
{
  if body.name.trim().is_empty() {
    return Err(ApiError::BadRequest("name is required".into()));
  }
  if !body.email.contains('@') {
    return Err(ApiError::BadRequest("a valid email is required".into()));
  }
  if body.password.chars().count() < 6 {
    return Err(ApiError::BadRequest(
      "password must be at least 6 characters".into(),
    ));
  }

  if state
    .store
    .find_user_by_email(&body.email)
    .await
    .map_err(store_err)?
    .is_some()
  {
    return Err(ApiError::DuplicateEmail(body.email));
  }

  let salt = SaltString::generate(&mut OsRng);
  let hash = Argon2::default()
    .hash_password(body.password.as_bytes(), &salt)
    .map_err(|e| ApiError::Internal(format!("argon2 error: {e}")))?
    .to_string();

  let user = state
    .store
    .create_user(NewUser {
      email:         body.email,
      name:          body.name,
      password_hash: Some(hash),
      role:          body.role.unwrap_or(Role::Attendee),
      bio:           body.bio,
    })
    .await
    .map_err(store_err)?;

  Ok((StatusCode::CREATED, Json(user)))
}

// ─── Login ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub email:    String,
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
  pub token: String,
}

/// `POST /api/auth/login`
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<TokenResponse>, ApiError>
where
  S: TalkStore + AccountStore + 'static,
{
  let user = state
    .store
    .find_user_by_email(&body.email)
    .await
    .map_err(store_err)?
    .ok_or(ApiError::BadLogin)?;

  let hash = user.password_hash.as_deref().ok_or(ApiError::BadLogin)?;
  let parsed = PasswordHash::new(hash).map_err(|_| ApiError::BadLogin)?;
  Argon2::default()
    .verify_password(body.password.as_bytes(), &parsed)
    .map_err(|_| ApiError::BadLogin)?;

  let identity = Identity {
    subject_id: user.user_id,
    email:      user.email,
    role:       user.role,
  };
  let token =
    rostrum_token::issue(&identity, &state.key, Utc::now(), state.token_ttl);

  Ok(Json(TokenResponse { token }))
}

// ─── Me ──────────────────────────────────────────────────────────────────────

/// `GET /api/auth/me`
pub async fn me<S>(
  State(state): State<AppState<S>>,
  Auth(identity): Auth,
) -> Result<Json<User>, ApiError>
where
  S: TalkStore + AccountStore + 'static,
{
  let user = state
    .store
    .find_user_by_id(identity.subject_id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| {
      // A valid token whose subject no longer exists: the account was
      // removed after issuance.
      ApiError::NotFound(format!("account {} not found", identity.subject_id))
    })?;

  Ok(Json(user))
}
