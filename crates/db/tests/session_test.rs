//! Integration tests for Session repository.

mod common;

use chrono::{Duration, Utc};
use tally_db::SessionRepository;

use common::{create_test_account, test_db};

#[tokio::test]
async fn test_session_create_and_find() {
    let db = test_db().await;
    let account = create_test_account(&db, "alice").await;
    let repo = SessionRepository::new(db);

    let (token, session) = repo
        .create(account.id, Duration::hours(1))
        .await
        .expect("Failed to create session");

    assert_eq!(session.account_id, account.id);
    assert_eq!(session.token_hash, SessionRepository::hash_token(&token));
    assert_ne!(session.token_hash, token);
    assert!(session.expires_at > Utc::now());
    assert!(session.revoked_at.is_none());

    let found = repo
        .find_active(&token)
        .await
        .expect("Query should succeed")
        .expect("Session should be active");
    assert_eq!(found.id, session.id);
    assert_eq!(found.session_id(), session.session_id());
    assert_eq!(session.session_id().into_inner().get_version_num(), 7);
}

#[tokio::test]
async fn test_session_unknown_token() {
    let db = test_db().await;
    let repo = SessionRepository::new(db);

    let found = repo.find_active("not-a-token").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_session_revoke_is_idempotent() {
    let db = test_db().await;
    let account = create_test_account(&db, "alice").await;
    let repo = SessionRepository::new(db);
    let (token, _) = repo.create(account.id, Duration::hours(1)).await.unwrap();

    assert!(repo.revoke_by_token(&token).await.unwrap());
    assert!(!repo.revoke_by_token(&token).await.unwrap());
    assert!(repo.find_active(&token).await.unwrap().is_none());
}

#[tokio::test]
async fn test_expired_session_not_active_and_purged() {
    let db = test_db().await;
    let account = create_test_account(&db, "alice").await;
    let repo = SessionRepository::new(db);

    let (expired, _) = repo
        .create(account.id, Duration::seconds(-1))
        .await
        .unwrap();
    let (live, _) = repo.create(account.id, Duration::hours(1)).await.unwrap();
    let (revoked, _) = repo.create(account.id, Duration::hours(1)).await.unwrap();
    repo.revoke_by_token(&revoked).await.unwrap();

    assert!(repo.find_active(&expired).await.unwrap().is_none());

    let purged = repo.purge_expired().await.unwrap();
    assert_eq!(purged, 2);
    assert!(repo.find_active(&live).await.unwrap().is_some());
}

#[test]
fn test_tokens_are_random_and_url_safe() {
    let a = SessionRepository::generate_token();
    let b = SessionRepository::generate_token();
    assert_ne!(a, b);
    assert!(
        a.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    );
    assert_eq!(SessionRepository::hash_token(&a).len(), 64);
}
