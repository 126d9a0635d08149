//! The talk access and lifecycle authority.
//!
//! Every permission rule in the system lives in this module, expressed as
//! total functions of `(role, subject id, owner id, status, requested
//! fields)`. The lifecycle methods on [`TalkAuthority`] are what handlers
//! call; the decision helpers underneath are pure and testable without a
//! store.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  error::{Error, Result},
  identity::{Identity, Role},
  store::{TalkFilter, TalkStore},
  talk::{NewTalk, Talk, TalkDraft, TalkPatch, TalkStatus},
};

// ─── Decision helpers ────────────────────────────────────────────────────────

/// Which slice of the talk collection `identity` may enumerate.
///
/// Any role added in the future falls into the attendee arm by default:
/// approved talks only.
pub fn visibility_filter(identity: &Identity) -> TalkFilter {
  match identity.role {
    Role::Organizer => TalkFilter::All,
    Role::Speaker => TalkFilter::BySpeaker(identity.subject_id),
    Role::Attendee => TalkFilter::ByStatus(TalkStatus::Approved),
  }
}

/// Owner/role resolution shared by update and delete.
///
/// Organizers always pass. Owners pass only while the talk is still pending;
/// after review it is the state, not the identity, that blocks them — hence
/// `Conflict` rather than `Forbidden`.
pub fn authorize_mutation(identity: &Identity, talk: &Talk) -> Result<()> {
  let is_organizer = identity.role == Role::Organizer;
  let is_owner = talk.speaker_id == identity.subject_id;

  if !is_organizer && !is_owner {
    return Err(Error::Forbidden("not the talk owner"));
  }
  if is_owner && !is_organizer && talk.status != TalkStatus::Pending {
    return Err(Error::Conflict("cannot modify after review"));
  }
  Ok(())
}

/// A duration is accepted if it fits a `u32` — in particular, negatives are
/// rejected.
fn validate_duration(minutes: Option<i64>) -> Result<Option<u32>> {
  match minutes {
    None => Ok(None),
    Some(m) => u32::try_from(m).map(Some).map_err(|_| {
      Error::InvalidInput(format!(
        "duration must be a non-negative number of minutes, got {m}"
      ))
    }),
  }
}

// ─── Authority ───────────────────────────────────────────────────────────────

/// The lifecycle front door: one method per use case, each taking the
/// verified [`Identity`] making the request.
///
/// Cloning is cheap — the store handle is reference-counted.
pub struct TalkAuthority<S> {
  store: Arc<S>,
}

impl<S> Clone for TalkAuthority<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store) }
  }
}

impl<S: TalkStore> TalkAuthority<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self { store }
  }

  fn store_err(e: S::Error) -> Error {
    Error::Unavailable(Box::new(e))
  }

  /// Submit a new talk. Speakers only; the submitting identity becomes the
  /// owner and the talk always starts pending, whatever the draft carried.
  pub async fn create(
    &self,
    identity: &Identity,
    draft: TalkDraft,
  ) -> Result<Talk> {
    if identity.role != Role::Speaker {
      return Err(Error::Forbidden("only speakers may submit talks"));
    }

    let title = draft.title.trim();
    if title.is_empty() {
      return Err(Error::InvalidInput("title is required".into()));
    }
    if draft.abstract_text.trim().is_empty() {
      return Err(Error::InvalidInput("abstract is required".into()));
    }
    let duration_minutes = validate_duration(draft.duration_minutes)?;

    self
      .store
      .insert(NewTalk {
        title: title.to_owned(),
        abstract_text: draft.abstract_text,
        speaker_id: identity.subject_id,
        status: TalkStatus::Pending,
        duration_minutes,
        notes: draft.notes,
      })
      .await
      .map_err(Self::store_err)
  }

  /// Enumerate the talks visible to `identity`, in insertion order.
  pub async fn list(&self, identity: &Identity) -> Result<Vec<Talk>> {
    self
      .store
      .find_by_filter(visibility_filter(identity))
      .await
      .map_err(Self::store_err)
  }

  /// Point lookup by id.
  ///
  /// Deliberately unrestricted by role or status: the visibility rules of
  /// [`Self::list`] apply to enumeration only, matching the access model of
  /// the system this one replaces.
  pub async fn get(&self, _identity: &Identity, talk_id: Uuid) -> Result<Talk> {
    self
      .store
      .find_by_id(talk_id)
      .await
      .map_err(Self::store_err)?
      .ok_or(Error::NotFound(talk_id))
  }

  /// Apply a partial update.
  ///
  /// Content fields are open to the owner while pending and to organizers
  /// at any status; the status field is organizer-only and overwrites
  /// unconditionally once validated. A patch that changes nothing returns
  /// the entity as read, without a store write.
  pub async fn update(
    &self,
    identity: &Identity,
    talk_id: Uuid,
    patch: TalkPatch,
  ) -> Result<Talk> {
    let mut talk = self
      .store
      .find_by_id(talk_id)
      .await
      .map_err(Self::store_err)?
      .ok_or(Error::NotFound(talk_id))?;

    authorize_mutation(identity, &talk)?;

    let revision = talk.updated_at;
    let mut changed = false;

    // Present-but-empty strings mean "leave unchanged".
    if let Some(title) =
      patch.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
      && talk.title != title
    {
      talk.title = title.to_owned();
      changed = true;
    }
    if let Some(abstract_text) =
      patch.abstract_text.as_deref().filter(|a| !a.trim().is_empty())
      && talk.abstract_text != abstract_text
    {
      talk.abstract_text = abstract_text.to_owned();
      changed = true;
    }
    if let Some(minutes) = validate_duration(patch.duration_minutes)?
      && talk.duration_minutes != Some(minutes)
    {
      talk.duration_minutes = Some(minutes);
      changed = true;
    }
    if let Some(notes) = patch.notes.as_deref().filter(|n| !n.is_empty())
      && talk.notes.as_deref() != Some(notes)
    {
      talk.notes = Some(notes.to_owned());
      changed = true;
    }

    if let Some(requested) = patch.status.as_deref() {
      if identity.role != Role::Organizer {
        return Err(Error::Forbidden("only organizers may change talk status"));
      }
      let status = TalkStatus::parse(requested).ok_or_else(|| {
        Error::InvalidInput(format!("invalid status: {requested:?}"))
      })?;
      // No transition graph: an organizer may follow any status with any
      // other, including resetting a reviewed talk to pending.
      if talk.status != status {
        talk.status = status;
        changed = true;
      }
    }

    if !changed {
      // Nothing to write. Handing back the entity as read keeps no-op
      // patches from producing timestamp-only diffs.
      return Ok(talk);
    }

    self.store.update(talk, revision).await.map_err(Self::store_err)
  }

  /// Withdraw a talk. Same ownership/role resolution as [`Self::update`]:
  /// owners only while pending, organizers at any time.
  pub async fn delete(&self, identity: &Identity, talk_id: Uuid) -> Result<()> {
    let talk = self
      .store
      .find_by_id(talk_id)
      .await
      .map_err(Self::store_err)?
      .ok_or(Error::NotFound(talk_id))?;

    authorize_mutation(identity, &talk)?;

    self
      .store
      .delete(talk_id, talk.updated_at)
      .await
      .map_err(Self::store_err)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
