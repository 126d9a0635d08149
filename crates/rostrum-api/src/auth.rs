//! Bearer-token extractor and standalone verifier.

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use chrono::{DateTime, Utc};
use rostrum_core::{
  identity::Identity,
  store::{AccountStore, TalkStore},
};
use rostrum_token::{AuthError, SigningKey};

use crate::{AppState, error::ApiError};

/// Extracts the verified [`Identity`] from `Authorization: Bearer <token>`.
///
/// Extraction runs before the handler body, so a missing or invalid
/// credential rejects the request without any talk-layer work.
pub struct Auth(pub Identity);

/// Verify the bearer credential in `headers` — also usable outside axum.
///
/// An absent header is [`AuthError::MissingCredential`]; a header that is
/// present but not a bearer token, or a token that fails verification, is
/// [`AuthError::InvalidCredential`].
pub fn verify_bearer(
  headers: &HeaderMap,
  key: &SigningKey,
  now: DateTime<Utc>,
) -> Result<Identity, AuthError> {
  let header_val = headers
    .get(header::AUTHORIZATION)
    .ok_or(AuthError::MissingCredential)?
    .to_str()
    .map_err(|_| AuthError::InvalidCredential)?;

  let token = header_val
    .strip_prefix("Bearer ")
    .ok_or(AuthError::InvalidCredential)?;

  rostrum_token::verify(token, key, now)
}

impl<S> FromRequestParts<AppState<S>> for Auth
where
  S: TalkStore + AccountStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let identity = verify_bearer(&parts.headers, &state.key, Utc::now())?;
    Ok(Auth(identity))
  }
}
