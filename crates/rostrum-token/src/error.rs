//! Error types for `rostrum-token`.

use thiserror::Error;

/// An authentication failure.
///
/// Callers must treat both variants as "not authenticated" — distinct from
/// an authorization failure, which presupposes a verified identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
  /// No token was presented at all.
  #[error("no credential presented")]
  MissingCredential,

  /// A token was presented but could not be accepted: bad signature,
  /// undecodable structure, unknown role, or elapsed validity window.
  /// The exact reason is deliberately not exposed to the caller.
  #[error("invalid credential")]
  InvalidCredential,
}

pub type Result<T, E = AuthError> = std::result::Result<T, E>;
