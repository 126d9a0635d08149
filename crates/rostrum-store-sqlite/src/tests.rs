//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::Duration;
use rostrum_core::{
  account::NewUser,
  identity::Role,
  store::{AccountStore, TalkFilter, TalkStore},
  talk::{NewTalk, TalkStatus},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_talk(speaker_id: Uuid, title: &str) -> NewTalk {
  NewTalk {
    title:            title.into(),
    abstract_text:    "An abstract".into(),
    speaker_id,
    status:           TalkStatus::Pending,
    duration_minutes: Some(30),
    notes:            None,
  }
}

// ─── Talks ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_find_by_id() {
  let s = store().await;
  let speaker = Uuid::new_v4();

  let talk = s.insert(new_talk(speaker, "Borrow checking")).await.unwrap();
  assert_eq!(talk.status, TalkStatus::Pending);
  assert_eq!(talk.created_at, talk.updated_at);

  let fetched = s.find_by_id(talk.talk_id).await.unwrap().unwrap();
  assert_eq!(fetched.talk_id, talk.talk_id);
  assert_eq!(fetched.title, "Borrow checking");
  assert_eq!(fetched.speaker_id, speaker);
  assert_eq!(fetched.duration_minutes, Some(30));
  assert_eq!(fetched.updated_at, talk.updated_at);
}

#[tokio::test]
async fn find_missing_returns_none() {
  let s = store().await;
  assert!(s.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn filter_all_preserves_insertion_order() {
  let s = store().await;
  let speaker = Uuid::new_v4();

  let t1 = s.insert(new_talk(speaker, "First")).await.unwrap();
  let t2 = s.insert(new_talk(speaker, "Second")).await.unwrap();
  let t3 = s.insert(new_talk(speaker, "Third")).await.unwrap();

  let all = s.find_by_filter(TalkFilter::All).await.unwrap();
  let ids: Vec<_> = all.iter().map(|t| t.talk_id).collect();
  assert_eq!(ids, vec![t1.talk_id, t2.talk_id, t3.talk_id]);
}

#[tokio::test]
async fn filter_by_speaker() {
  let s = store().await;
  let alice = Uuid::new_v4();
  let bob = Uuid::new_v4();

  s.insert(new_talk(alice, "A1")).await.unwrap();
  s.insert(new_talk(bob, "B1")).await.unwrap();
  s.insert(new_talk(alice, "A2")).await.unwrap();

  let talks = s.find_by_filter(TalkFilter::BySpeaker(alice)).await.unwrap();
  assert_eq!(talks.len(), 2);
  assert!(talks.iter().all(|t| t.speaker_id == alice));
}

#[tokio::test]
async fn filter_by_status() {
  let s = store().await;
  let speaker = Uuid::new_v4();

  let t1 = s.insert(new_talk(speaker, "Keep pending")).await.unwrap();
  let mut t2 = s.insert(new_talk(speaker, "Approve me")).await.unwrap();

  let rev = t2.updated_at;
  t2.status = TalkStatus::Approved;
  s.update(t2, rev).await.unwrap();

  let approved = s
    .find_by_filter(TalkFilter::ByStatus(TalkStatus::Approved))
    .await
    .unwrap();
  assert_eq!(approved.len(), 1);
  assert_eq!(approved[0].title, "Approve me");

  let pending = s
    .find_by_filter(TalkFilter::ByStatus(TalkStatus::Pending))
    .await
    .unwrap();
  assert_eq!(pending.len(), 1);
  assert_eq!(pending[0].talk_id, t1.talk_id);
}

#[tokio::test]
async fn update_refreshes_revision_and_keeps_owner() {
  let s = store().await;
  let speaker = Uuid::new_v4();
  let mut talk = s.insert(new_talk(speaker, "Old title")).await.unwrap();

  let rev = talk.updated_at;
  talk.title = "New title".into();
  let saved = s.update(talk, rev).await.unwrap();

  assert_eq!(saved.title, "New title");
  assert!(saved.updated_at > rev);

  let fetched = s.find_by_id(saved.talk_id).await.unwrap().unwrap();
  assert_eq!(fetched.title, "New title");
  assert_eq!(fetched.speaker_id, speaker);
  assert_eq!(fetched.updated_at, saved.updated_at);
}

#[tokio::test]
async fn update_with_stale_revision_fails() {
  let s = store().await;
  let mut talk = s.insert(new_talk(Uuid::new_v4(), "T")).await.unwrap();

  let stale = talk.updated_at - Duration::seconds(1);
  talk.title = "Racer".into();
  let err = s.update(talk, stale).await.unwrap_err();
  assert!(matches!(err, crate::Error::StaleRevision(_)));
}

#[tokio::test]
async fn update_lost_race_leaves_row_at_winner_state() {
  let s = store().await;
  let talk = s.insert(new_talk(Uuid::new_v4(), "T")).await.unwrap();
  let rev = talk.updated_at;

  // First writer wins.
  let mut first = talk.clone();
  first.title = "Winner".into();
  let saved = s.update(first, rev).await.unwrap();

  // Second writer carried the original revision and must lose.
  let mut second = talk;
  second.title = "Loser".into();
  let err = s.update(second, rev).await.unwrap_err();
  assert!(matches!(err, crate::Error::StaleRevision(_)));

  let fetched = s.find_by_id(saved.talk_id).await.unwrap().unwrap();
  assert_eq!(fetched.title, "Winner");
}

#[tokio::test]
async fn delete_guarded_by_revision() {
  let s = store().await;
  let talk = s.insert(new_talk(Uuid::new_v4(), "T")).await.unwrap();

  let stale = talk.updated_at - Duration::seconds(1);
  let err = s.delete(talk.talk_id, stale).await.unwrap_err();
  assert!(matches!(err, crate::Error::StaleRevision(_)));

  s.delete(talk.talk_id, talk.updated_at).await.unwrap();
  assert!(s.find_by_id(talk.talk_id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_fails() {
  let s = store().await;
  let err = s
    .delete(Uuid::new_v4(), chrono::Utc::now())
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::StaleRevision(_)));
}

// ─── Users ───────────────────────────────────────────────────────────────────

fn new_user(email: &str, role: Role) -> NewUser {
  NewUser {
    email:         email.into(),
    name:          "Ada".into(),
    password_hash: Some("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into()),
    role,
    bio:           None,
  }
}

#[tokio::test]
async fn create_and_find_user() {
  let s = store().await;

  let user = s
    .create_user(new_user("ada@example.com", Role::Speaker))
    .await
    .unwrap();
  assert_eq!(user.role, Role::Speaker);

  let by_email = s
    .find_user_by_email("ada@example.com")
    .await
    .unwrap()
    .unwrap();
  assert_eq!(by_email.user_id, user.user_id);
  assert!(by_email.password_hash.is_some());

  let by_id = s.find_user_by_id(user.user_id).await.unwrap().unwrap();
  assert_eq!(by_id.email, "ada@example.com");
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
  let s = store().await;

  s.create_user(new_user("ada@example.com", Role::Attendee))
    .await
    .unwrap();
  let err = s
    .create_user(new_user("ada@example.com", Role::Organizer))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::DuplicateEmail(_)));
}

#[tokio::test]
async fn unknown_user_lookups_return_none() {
  let s = store().await;
  assert!(
    s.find_user_by_email("nobody@example.com")
      .await
      .unwrap()
      .is_none()
  );
  assert!(s.find_user_by_id(Uuid::new_v4()).await.unwrap().is_none());
}
