//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings; UUIDs as hyphenated lowercase
//! strings; role and status as their lowercase discriminants.

use chrono::{DateTime, Utc};
use rostrum_core::{
  account::User,
  identity::Role,
  talk::{Talk, TalkStatus},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String {
  id.hyphenated().to_string()
}

pub fn decode_uuid(s: &str) -> Result<Uuid> {
  Ok(Uuid::parse_str(s)?)
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enums ───────────────────────────────────────────────────────────────────

pub fn decode_status(s: &str) -> Result<TalkStatus> {
  TalkStatus::parse(s)
    .ok_or_else(|| Error::Decode(format!("unknown talk status: {s:?}")))
}

pub fn decode_role(s: &str) -> Result<Role> {
  Role::parse(s).ok_or_else(|| Error::Decode(format!("unknown role: {s:?}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `talks` row.
pub struct RawTalk {
  pub talk_id:          String,
  pub title:            String,
  pub abstract_text:    String,
  pub speaker_id:       String,
  pub status:           String,
  pub duration_minutes: Option<i64>,
  pub notes:            Option<String>,
  pub created_at:       String,
  pub updated_at:       String,
}

impl RawTalk {
  pub fn into_talk(self) -> Result<Talk> {
    Ok(Talk {
      talk_id:          decode_uuid(&self.talk_id)?,
      title:            self.title,
      abstract_text:    self.abstract_text,
      speaker_id:       decode_uuid(&self.speaker_id)?,
      status:           decode_status(&self.status)?,
      duration_minutes: self.duration_minutes.map(|m| m as u32),
      notes:            self.notes,
      created_at:       decode_dt(&self.created_at)?,
      updated_at:       decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub user_id:       String,
  pub email:         String,
  pub name:          String,
  pub password_hash: Option<String>,
  pub role:          String,
  pub bio:           Option<String>,
  pub created_at:    String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:       decode_uuid(&self.user_id)?,
      email:         self.email,
      name:          self.name,
      password_hash: self.password_hash,
      role:          decode_role(&self.role)?,
      bio:           self.bio,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}
