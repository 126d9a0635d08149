//! Token verification.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
use chrono::{DateTime, Utc};
use rostrum_core::identity::Identity;
use subtle::ConstantTimeEq as _;

use crate::{AuthError, Claims, Result, SigningKey, mac_bytes};

/// Verify `token` against `key` as of `now`, recovering the embedded
/// identity.
///
/// The signature is checked in constant time, and before any claim is
/// inspected. Every defect — signature, structure, validity window —
/// collapses to [`AuthError::InvalidCredential`].
pub fn verify(
  token: &str,
  key: &SigningKey,
  now: DateTime<Utc>,
) -> Result<Identity> {
  let (body_b64, sig_b64) =
    token.split_once('.').ok_or(AuthError::InvalidCredential)?;

  let provided =
    B64.decode(sig_b64).map_err(|_| AuthError::InvalidCredential)?;
  let expected = mac_bytes(key, body_b64.as_bytes());

  if !bool::from(expected.as_slice().ct_eq(provided.as_slice())) {
    return Err(AuthError::InvalidCredential);
  }

  let body = B64.decode(body_b64).map_err(|_| AuthError::InvalidCredential)?;
  let claims: Claims =
    serde_json::from_slice(&body).map_err(|_| AuthError::InvalidCredential)?;

  if claims.exp <= now.timestamp() {
    return Err(AuthError::InvalidCredential);
  }

  Ok(Identity {
    subject_id: claims.sub,
    email:      claims.email,
    role:       claims.role,
  })
}

#[cfg(test)]
mod tests {
  use chrono::Duration;
  use rostrum_core::identity::Role;
  use uuid::Uuid;

  use super::*;
  use crate::issue;

  fn key() -> SigningKey {
    SigningKey::new(*b"0123456789abcdef0123456789abcdef")
  }

  fn identity() -> Identity {
    Identity {
      subject_id: Uuid::new_v4(),
      email:      "ada@example.com".into(),
      role:       Role::Speaker,
    }
  }

  #[test]
  fn round_trip() {
    let ident = identity();
    let now = Utc::now();
    let token = issue(&ident, &key(), now, Duration::hours(1));

    let recovered = verify(&token, &key(), now).unwrap();
    assert_eq!(recovered.subject_id, ident.subject_id);
    assert_eq!(recovered.email, ident.email);
    assert_eq!(recovered.role, Role::Speaker);
  }

  #[test]
  fn expired_token_is_rejected() {
    let now = Utc::now();
    let token = issue(&identity(), &key(), now, Duration::hours(1));

    let err = verify(&token, &key(), now + Duration::hours(2)).unwrap_err();
    assert_eq!(err, AuthError::InvalidCredential);
  }

  #[test]
  fn expiry_boundary_is_exclusive() {
    let now = Utc::now();
    let token = issue(&identity(), &key(), now, Duration::hours(1));

    // Valid strictly before exp, rejected at exp.
    assert!(verify(&token, &key(), now + Duration::minutes(59)).is_ok());
    assert!(verify(&token, &key(), now + Duration::hours(1)).is_err());
  }

  #[test]
  fn wrong_key_is_rejected() {
    let token = issue(&identity(), &key(), Utc::now(), Duration::hours(1));
    let other = SigningKey::new(*b"ffffffffffffffffffffffffffffffff");

    assert_eq!(
      verify(&token, &other, Utc::now()).unwrap_err(),
      AuthError::InvalidCredential
    );
  }

  #[test]
  fn tampered_claims_are_rejected() {
    let now = Utc::now();
    let token = issue(&identity(), &key(), now, Duration::hours(1));

    // Swap in a forged claims segment while keeping the real signature.
    let (_, sig) = token.split_once('.').unwrap();
    let claims = Claims {
      sub:   Uuid::new_v4(),
      email: "mallory@example.com".into(),
      role:  Role::Organizer,
      iat:   now.timestamp(),
      exp:   (now + Duration::hours(1)).timestamp(),
    };
    let forged_body = crate::encode(&claims, &key());
    let forged_body = forged_body.split_once('.').unwrap().0;
    let forged = format!("{forged_body}.{sig}");

    assert!(verify(&forged, &key(), now).is_err());
  }

  #[test]
  fn malformed_tokens_are_rejected() {
    let now = Utc::now();
    for bad in ["", "no-dot-here", "a.b", "!!!.???", "a.b.c"] {
      assert_eq!(
        verify(bad, &key(), now).unwrap_err(),
        AuthError::InvalidCredential,
        "token {bad:?}"
      );
    }
  }

  #[test]
  fn unknown_role_is_rejected() {
    // Hand-roll a correctly signed token whose role is outside the enum.
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;

    let now = Utc::now();
    let body = serde_json::json!({
      "sub": Uuid::new_v4(),
      "email": "x@example.com",
      "role": "superuser",
      "iat": now.timestamp(),
      "exp": (now + Duration::hours(1)).timestamp(),
    });
    let body_b64 = B64.encode(body.to_string());
    let sig_b64 = B64.encode(crate::mac_bytes(&key(), body_b64.as_bytes()));
    let token = format!("{body_b64}.{sig_b64}");

    assert_eq!(
      verify(&token, &key(), now).unwrap_err(),
      AuthError::InvalidCredential
    );
  }
}
