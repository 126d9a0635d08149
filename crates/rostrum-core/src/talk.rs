//! Talk — the submission entity and its review status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Review status of a talk. Every talk starts `Pending`; only an organizer
/// moves it anywhere else, and any status may follow any status (a second
/// review decision is an idempotent overwrite, not a separate state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TalkStatus {
  Pending,
  Approved,
  Rejected,
}

impl TalkStatus {
  /// The string stored in the database `status` column.
  /// Must match the `rename_all = "lowercase"` serde tags above.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Pending => "pending",
      Self::Approved => "approved",
      Self::Rejected => "rejected",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "pending" => Some(Self::Pending),
      "approved" => Some(Self::Approved),
      "rejected" => Some(Self::Rejected),
      _ => None,
    }
  }
}

// ─── Talk ────────────────────────────────────────────────────────────────────

/// A talk submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Talk {
  pub talk_id:          Uuid,
  pub title:            String,
  /// The proposal abstract. Named `abstract_text` because `abstract` is a
  /// reserved word in Rust; the serialised field keeps the plain name.
  #[serde(rename = "abstract")]
  pub abstract_text:    String,
  /// The owning identity's subject id. Set once at creation, never
  /// reassigned.
  pub speaker_id:       Uuid,
  pub status:           TalkStatus,
  pub duration_minutes: Option<u32>,
  pub notes:            Option<String>,
  /// Store-assigned; never written by the authority.
  pub created_at:       DateTime<Utc>,
  /// Store-assigned. Doubles as the revision that guarded writes are keyed
  /// on — see [`crate::store::TalkStore`].
  pub updated_at:       DateTime<Utc>,
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Input to [`crate::store::TalkStore::insert`].
/// Id and timestamps are always assigned by the store; `speaker_id` and
/// `status` are fixed by the authority before this struct exists.
#[derive(Debug, Clone)]
pub struct NewTalk {
  pub title:            String,
  pub abstract_text:    String,
  pub speaker_id:       Uuid,
  pub status:           TalkStatus,
  pub duration_minutes: Option<u32>,
  pub notes:            Option<String>,
}

/// Caller-supplied fields for a new submission.
///
/// There is deliberately no speaker or status field: the authority sets the
/// owner from the verified identity and every new talk starts pending,
/// whatever the request body claimed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TalkDraft {
  #[serde(default)]
  pub title:            String,
  #[serde(rename = "abstract", default)]
  pub abstract_text:    String,
  /// Accepted as a raw integer so the authority owns the non-negative check.
  pub duration_minutes: Option<i64>,
  pub notes:            Option<String>,
}

/// Partial update to a talk.
///
/// Present-but-empty strings mean "leave unchanged" — field-omission
/// semantics, not null-overwrite. `status` stays a raw string until the
/// authority validates it against the enum.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TalkPatch {
  pub title:            Option<String>,
  #[serde(rename = "abstract")]
  pub abstract_text:    Option<String>,
  pub duration_minutes: Option<i64>,
  pub notes:            Option<String>,
  pub status:           Option<String>,
}
