//! User accounts.
//!
//! Accounts exist to issue credentials; the talk authority never consults
//! them. Once a token is minted the claims inside it are the sole source of
//! identity for that token's validity window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::Role;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub user_id:       Uuid,
  pub email:         String,
  pub name:          String,
  /// Argon2 PHC string. Absent for externally provisioned accounts.
  /// Never serialised into responses.
  #[serde(skip_serializing)]
  pub password_hash: Option<String>,
  pub role:          Role,
  pub bio:           Option<String>,
  pub created_at:    DateTime<Utc>,
}

/// Input to [`crate::store::AccountStore::create_user`].
/// `user_id` and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub email:         String,
  pub name:          String,
  pub password_hash: Option<String>,
  pub role:          Role,
  pub bio:           Option<String>,
}
