//! Token minting.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
use chrono::{DateTime, Duration, Utc};
use rostrum_core::identity::Identity;

use crate::{Claims, SigningKey, mac_bytes};

/// Mint a signed token for `identity`, valid for `ttl` starting at `now`.
pub fn issue(
  identity: &Identity,
  key: &SigningKey,
  now: DateTime<Utc>,
  ttl: Duration,
) -> String {
  let claims = Claims {
    sub:   identity.subject_id,
    email: identity.email.clone(),
    role:  identity.role,
    iat:   now.timestamp(),
    exp:   (now + ttl).timestamp(),
  };
  encode(&claims, key)
}

/// Encode and sign pre-built claims. Timestamps are taken as-is; `issue` is
/// the convenience wrapper that fills them in.
pub fn encode(claims: &Claims, key: &SigningKey) -> String {
  // Claims is a plain struct of strings and integers; serialisation does
  // not fail.
  let body = serde_json::to_vec(claims).expect("claims serialise to JSON");
  let body_b64 = B64.encode(body);
  let sig_b64 = B64.encode(mac_bytes(key, body_b64.as_bytes()));
  format!("{body_b64}.{sig_b64}")
}
