//! JSON HTTP layer for Rostrum.
//!
//! Exposes an axum [`Router`] over any backend implementing
//! [`TalkStore`] + [`AccountStore`]. Handlers map the core's typed denials
//! onto HTTP statuses; the core never sees a request, a header, or a status
//! code.

pub mod auth;
pub mod error;
pub mod handlers;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use chrono::Duration;
use rostrum_core::{
  authority::TalkAuthority,
  store::{AccountStore, TalkStore},
};
use rostrum_token::SigningKey;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// `ROSTRUM_*` environment.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Shared secret the token signing key is built from. Should be at least
  /// 32 bytes of random data.
  pub token_secret: String,
  /// Validity window for issued tokens.
  #[serde(default = "default_token_ttl_minutes")]
  pub token_ttl_minutes: i64,
}

fn default_token_ttl_minutes() -> i64 {
  60
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub authority: TalkAuthority<S>,
  pub store:     Arc<S>,
  pub key:       SigningKey,
  pub token_ttl: Duration,
}

impl<S: TalkStore> AppState<S> {
  pub fn new(store: Arc<S>, key: SigningKey, token_ttl: Duration) -> Self {
    Self {
      authority: TalkAuthority::new(Arc::clone(&store)),
      store,
      key,
      token_ttl,
    }
  }
}

// Manual impl: `S` itself need not be `Clone`, only the handles are.
impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      authority: self.authority.clone(),
      store:     Arc::clone(&self.store),
      key:       self.key.clone(),
      token_ttl: self.token_ttl,
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the Rostrum API.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: TalkStore + AccountStore + 'static,
{
  Router::new()
    .route("/api/auth/signup", post(handlers::accounts::signup::<S>))
    .route("/api/auth/login", post(handlers::accounts::login::<S>))
    .route("/api/auth/me", get(handlers::accounts::me::<S>))
    .route(
      "/api/talks",
      get(handlers::talks::list::<S>).post(handlers::talks::create::<S>),
    )
    .route(
      "/api/talks/{id}",
      get(handlers::talks::get_one::<S>)
        .put(handlers::talks::update_one::<S>)
        .delete(handlers::talks::delete_one::<S>),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────
