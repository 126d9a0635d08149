//! Signed bearer-token codec for Rostrum.
//!
//! A token is two base64url segments, `claims "." signature`, where the
//! signature is an HMAC-SHA256 over the encoded claims segment. Verification
//! is a pure function of token + key + current time: no storage lookups, no
//! revocation — the claims are trusted as of issuance for their validity
//! window.

pub mod error;
mod issue;
mod verify;

pub use error::{AuthError, Result};
pub use issue::{encode, issue};
pub use verify::verify;

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use rostrum_core::identity::Role;

// ─── Signing key ─────────────────────────────────────────────────────────────

/// The process-wide token signing key.
///
/// Loaded once at startup from configuration and injected wherever tokens
/// are minted or verified; never read from ambient global state. The secret
/// should be at least 32 bytes of cryptographically random data.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
  pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
    Self(bytes.into())
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

// ─── Claims ──────────────────────────────────────────────────────────────────

/// The claims embedded in a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
  /// Stable subject id; becomes `Identity::subject_id`.
  pub sub:   Uuid,
  pub email: String,
  pub role:  Role,
  /// Issued-at, unix seconds.
  pub iat:   i64,
  /// Expiry, unix seconds. The token is rejected once `exp <= now`.
  pub exp:   i64,
}

// ─── MAC ─────────────────────────────────────────────────────────────────────

/// HMAC-SHA256 over `payload`, keyed with `key`.
pub(crate) fn mac_bytes(key: &SigningKey, payload: &[u8]) -> Vec<u8> {
  type HmacSha256 = Hmac<Sha256>;

  let mut mac = HmacSha256::new_from_slice(&key.0)
    .expect("HMAC can take a key of any size");
  mac.update(payload);
  mac.finalize().into_bytes().to_vec()
}
