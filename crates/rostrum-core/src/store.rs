//! The storage collaborator traits and the reified visibility filter.
//!
//! Implemented by storage backends (e.g. `rostrum-store-sqlite`). The
//! authority and the HTTP layer depend on these abstractions, not on any
//! concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  account::{NewUser, User},
  talk::{NewTalk, Talk, TalkStatus},
};

// ─── Visibility filter ───────────────────────────────────────────────────────

/// The reified predicate behind [`TalkStore::find_by_filter`].
///
/// Which variant applies to a request is decided by the authority's role
/// matrix ([`crate::authority::visibility_filter`]); the store only executes
/// the predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TalkFilter {
  /// Every talk, any status.
  All,
  /// Talks owned by one speaker, any status.
  BySpeaker(Uuid),
  /// Talks in one review status, any speaker.
  ByStatus(TalkStatus),
}

// ─── TalkStore ───────────────────────────────────────────────────────────────

/// Abstraction over talk persistence.
///
/// `update` and `delete` are guarded writes keyed on the `updated_at`
/// revision observed at read time: the backend must apply the write only if
/// the row still carries that exact revision. This gives the authority's
/// read-evaluate-write sequence single-document consistency without any
/// in-process locking.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (tokio with `axum`).
pub trait TalkStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new talk, assigning its id and both timestamps.
  fn insert(
    &self,
    input: NewTalk,
  ) -> impl Future<Output = Result<Talk, Self::Error>> + Send + '_;

  /// Fetch one talk by id. Returns `None` if absent.
  fn find_by_id(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Talk>, Self::Error>> + Send + '_;

  /// All talks matching `filter`, in insertion order.
  fn find_by_filter(
    &self,
    filter: TalkFilter,
  ) -> impl Future<Output = Result<Vec<Talk>, Self::Error>> + Send + '_;

  /// Write back a modified talk if its stored revision still equals
  /// `expected_revision`. Refreshes `updated_at` and returns the saved row;
  /// fails if the row is gone or the revision is stale.
  fn update(
    &self,
    talk: Talk,
    expected_revision: DateTime<Utc>,
  ) -> impl Future<Output = Result<Talk, Self::Error>> + Send + '_;

  /// Remove a talk if its stored revision still equals `expected_revision`.
  fn delete(
    &self,
    id: Uuid,
    expected_revision: DateTime<Utc>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

// ─── AccountStore ────────────────────────────────────────────────────────────

/// Abstraction over account persistence.
///
/// Consumed only by the credential-issuing handlers; the talk authority
/// never reads accounts.
pub trait AccountStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create a new account. The store enforces email uniqueness.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  fn find_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  fn find_user_by_id(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;
}
