//! Handlers for `/api/talks` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/api/talks` | Submit a talk; speakers only |
//! | `GET`    | `/api/talks` | Role-filtered listing |
//! | `GET`    | `/api/talks/:id` | Any authenticated identity |
//! | `PUT`    | `/api/talks/:id` | Owner while pending, organizer anytime |
//! | `DELETE` | `/api/talks/:id` | Same rules as `PUT` |
//!
//! All authorization logic lives in [`rostrum_core::authority`]; these
//! functions only shuttle JSON in and out.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use rostrum_core::{
  store::{AccountStore, TalkStore},
  talk::{Talk, TalkDraft, TalkPatch},
};
use uuid::Uuid;

use crate::{AppState, auth::Auth, error::ApiError};

/// `POST /api/talks`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Auth(identity): Auth,
  Json(draft): Json<TalkDraft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TalkStore + AccountStore + 'static,
{
  let talk = state.authority.create(&identity, draft).await?;
  Ok((StatusCode::CREATED, Json(talk)))
}

/// `GET /api/talks`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Auth(identity): Auth,
) -> Result<Json<Vec<Talk>>, ApiError>
where
  S: TalkStore + AccountStore + 'static,
{
  let talks = state.authority.list(&identity).await?;
  Ok(Json(talks))
}

/// `GET /api/talks/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Auth(identity): Auth,
  Path(id): Path<Uuid>,
) -> Result<Json<Talk>, ApiError>
where
  S: TalkStore + AccountStore + 'static,
{
  let talk = state.authority.get(&identity, id).await?;
  Ok(Json(talk))
}

/// `PUT /api/talks/:id`
pub async fn update_one<S>(
  State(state): State<AppState<S>>,
  Auth(identity): Auth,
  Path(id): Path<Uuid>,
  Json(patch): Json<TalkPatch>,
) -> Result<Json<Talk>, ApiError>
where
  S: TalkStore + AccountStore + 'static,
{
  let talk = state.authority.update(&identity, id, patch).await?;
  Ok(Json(talk))
}

/// `DELETE /api/talks/:id`
pub async fn delete_one<S>(
  State(state): State<AppState<S>>,
  Auth(identity): Auth,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TalkStore + AccountStore + 'static,
{
  state.authority.delete(&identity, id).await?;
  Ok(StatusCode::NO_CONTENT)
}
