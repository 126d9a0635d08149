//! Error type for `rostrum-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored discriminant string no longer maps onto the enum.
  #[error("cannot decode column value: {0}")]
  Decode(String),

  /// A guarded write found the row gone or carrying a different revision
  /// than the one observed at read time.
  #[error("talk {0}: row missing or revision stale")]
  StaleRevision(uuid::Uuid),

  #[error("email already registered: {0}")]
  DuplicateEmail(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
