//! Error taxonomy for the authorization and lifecycle core.

use thiserror::Error;
use uuid::Uuid;

/// A typed denial or failure from the talk authority.
///
/// Every variant except [`Error::Unavailable`] is deterministic for a given
/// identity and entity state, and is not retryable.
#[derive(Debug, Error)]
pub enum Error {
  /// Authenticated, but the role/ownership matrix denies the operation.
  #[error("forbidden: {0}")]
  Forbidden(&'static str),

  #[error("talk not found: {0}")]
  NotFound(Uuid),

  /// Valid target, valid identity, but the current status disallows the
  /// action.
  #[error("conflict: {0}")]
  Conflict(&'static str),

  #[error("invalid input: {0}")]
  InvalidInput(String),

  /// The storage collaborator failed. The only retryable kind.
  #[error("storage unavailable: {0}")]
  Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
