//! Identity — the authenticated caller as seen by the authorization core.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The privilege level carried by a verified credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Attendee,
  Speaker,
  Organizer,
}

impl Role {
  /// The string stored in database columns and token claims.
  /// Must match the `rename_all = "lowercase"` serde tags above.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Attendee => "attendee",
      Self::Speaker => "speaker",
      Self::Organizer => "organizer",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "attendee" => Some(Self::Attendee),
      "speaker" => Some(Self::Speaker),
      "organizer" => Some(Self::Organizer),
      _ => None,
    }
  }
}

/// The authenticated caller: subject id, email, and role, recovered from a
/// verified credential. Immutable for the lifetime of one request; never
/// persisted by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
  pub subject_id: Uuid,
  pub email:      String,
  pub role:       Role,
}
