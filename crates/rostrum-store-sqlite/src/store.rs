//! [`SqliteStore`] — the SQLite implementation of [`TalkStore`] and
//! [`AccountStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use rostrum_core::{
  account::{NewUser, User},
  store::{AccountStore, TalkFilter, TalkStore},
  talk::{NewTalk, Talk},
};

use crate::{
  Error, Result,
  encode::{RawTalk, RawUser, encode_dt, encode_uuid},
  schema::SCHEMA,
};

const TALK_COLUMNS: &str = "talk_id, title, abstract, speaker_id, status, \
                            duration_minutes, notes, created_at, updated_at";

const USER_COLUMNS: &str =
  "user_id, email, name, password_hash, role, bio, created_at";

fn raw_talk(row: &rusqlite::Row) -> rusqlite::Result<RawTalk> {
  Ok(RawTalk {
    talk_id:          row.get(0)?,
    title:            row.get(1)?,
    abstract_text:    row.get(2)?,
    speaker_id:       row.get(3)?,
    status:           row.get(4)?,
    duration_minutes: row.get(5)?,
    notes:            row.get(6)?,
    created_at:       row.get(7)?,
    updated_at:       row.get(8)?,
  })
}

fn raw_user(row: &rusqlite::Row) -> rusqlite::Result<RawUser> {
  Ok(RawUser {
    user_id:       row.get(0)?,
    email:         row.get(1)?,
    name:          row.get(2)?,
    password_hash: row.get(3)?,
    role:          row.get(4)?,
    bio:           row.get(5)?,
    created_at:    row.get(6)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Rostrum store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── TalkStore impl ──────────────────────────────────────────────────────────

impl TalkStore for SqliteStore {
  type Error = Error;

  async fn insert(&self, input: NewTalk) -> Result<Talk> {
    let now = Utc::now();
    let talk = Talk {
      talk_id:          Uuid::new_v4(),
      title:            input.title,
      abstract_text:    input.abstract_text,
      speaker_id:       input.speaker_id,
      status:           input.status,
      duration_minutes: input.duration_minutes,
      notes:            input.notes,
      created_at:       now,
      updated_at:       now,
    };

    let id_str      = encode_uuid(talk.talk_id);
    let title       = talk.title.clone();
    let abstract_s  = talk.abstract_text.clone();
    let speaker_str = encode_uuid(talk.speaker_id);
    let status_str  = talk.status.as_str().to_owned();
    let duration    = talk.duration_minutes.map(i64::from);
    let notes       = talk.notes.clone();
    let at_str      = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO talks (
             talk_id, title, abstract, speaker_id, status,
             duration_minutes, notes, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
          rusqlite::params![
            id_str,
            title,
            abstract_s,
            speaker_str,
            status_str,
            duration,
            notes,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(talk)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Talk>> {
    let id_str = encode_uuid(id);
    let sql = format!("SELECT {TALK_COLUMNS} FROM talks WHERE talk_id = ?1");

    let raw: Option<RawTalk> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], raw_talk)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawTalk::into_talk).transpose()
  }

  async fn find_by_filter(&self, filter: TalkFilter) -> Result<Vec<Talk>> {
    // `ORDER BY rowid` pins insertion order; no other ordering is imposed.
    let (where_clause, param) = match filter {
      TalkFilter::All => ("", None),
      TalkFilter::BySpeaker(id) => {
        ("WHERE speaker_id = ?1", Some(encode_uuid(id)))
      }
      TalkFilter::ByStatus(s) => {
        ("WHERE status = ?1", Some(s.as_str().to_owned()))
      }
    };
    let sql =
      format!("SELECT {TALK_COLUMNS} FROM talks {where_clause} ORDER BY rowid");

    let raws: Vec<RawTalk> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = match param {
          Some(p) => stmt
            .query_map(rusqlite::params![p], raw_talk)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
          None => stmt
            .query_map([], raw_talk)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTalk::into_talk).collect()
  }

  async fn update(
    &self,
    talk: Talk,
    expected_revision: DateTime<Utc>,
  ) -> Result<Talk> {
    let mut saved = talk;
    saved.updated_at = Utc::now();

    let id_str       = encode_uuid(saved.talk_id);
    let title        = saved.title.clone();
    let abstract_s   = saved.abstract_text.clone();
    let status_str   = saved.status.as_str().to_owned();
    let duration     = saved.duration_minutes.map(i64::from);
    let notes        = saved.notes.clone();
    let new_rev_str  = encode_dt(saved.updated_at);
    let expected_str = encode_dt(expected_revision);

    // The revision guard makes this a compare-and-swap: the row is written
    // only if nobody else touched it since it was read. `speaker_id` and
    // `created_at` are deliberately absent from the SET list.
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE talks
           SET title = ?1, abstract = ?2, status = ?3,
               duration_minutes = ?4, notes = ?5, updated_at = ?6
           WHERE talk_id = ?7 AND updated_at = ?8",
          rusqlite::params![
            title,
            abstract_s,
            status_str,
            duration,
            notes,
            new_rev_str,
            id_str,
            expected_str,
          ],
        )?)
      })
      .await?;

    if affected == 0 {
      return Err(Error::StaleRevision(saved.talk_id));
    }
    Ok(saved)
  }

  async fn delete(&self, id: Uuid, expected_revision: DateTime<Utc>) -> Result<()> {
    let id_str       = encode_uuid(id);
    let expected_str = encode_dt(expected_revision);

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM talks WHERE talk_id = ?1 AND updated_at = ?2",
          rusqlite::params![id_str, expected_str],
        )?)
      })
      .await?;

    if affected == 0 {
      return Err(Error::StaleRevision(id));
    }
    Ok(())
  }
}

// ─── AccountStore impl ───────────────────────────────────────────────────────

impl AccountStore for SqliteStore {
  type Error = Error;

  async fn create_user(&self, input: NewUser) -> Result<User> {
    let user = User {
      user_id:       Uuid::new_v4(),
      email:         input.email,
      name:          input.name,
      password_hash: input.password_hash,
      role:          input.role,
      bio:           input.bio,
      created_at:    Utc::now(),
    };

    let id_str   = encode_uuid(user.user_id);
    let email    = user.email.clone();
    let name     = user.name.clone();
    let hash     = user.password_hash.clone();
    let role_str = user.role.as_str().to_owned();
    let bio      = user.bio.clone();
    let at_str   = encode_dt(user.created_at);

    // Existence check and insert run in the same connection call, so no
    // other write can interleave between them.
    let inserted: bool = self
      .conn
      .call(move |conn| {
        let taken: bool = conn
          .query_row(
            "SELECT 1 FROM users WHERE email = ?1",
            rusqlite::params![email],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if taken {
          return Ok(false);
        }

        conn.execute(
          "INSERT INTO users (
             user_id, email, name, password_hash, role, bio, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![id_str, email, name, hash, role_str, bio, at_str],
        )?;
        Ok(true)
      })
      .await?;

    if !inserted {
      return Err(Error::DuplicateEmail(user.email));
    }
    Ok(user)
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let email = email.to_owned();
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1");

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![email], raw_user)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
    let id_str = encode_uuid(id);
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?1");

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], raw_user)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }
}
