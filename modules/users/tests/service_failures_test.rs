//! Service failure mapping for store faults injected through a mock store.

mod common;

use uuid::Uuid;

use common::{new_user, sample_user, Fault, MockStore};
use users::contract::model::UserPatch;
use users::domain::error::DomainError;

#[tokio::test]
async fn store_duplicate_key_on_create_is_a_conflict() {
    let service = MockStore::new(Fault::DuplicateOnWrite).service();

    let err = service
        .create_user(new_user("Race", "Loser", "Race@Example.com"))
        .await
        .unwrap_err();

    assert!(
        matches!(err, DomainError::EmailAlreadyExists { ref email } if email == "race@example.com")
    );
}

#[tokio::test]
async fn store_duplicate_key_on_update_is_a_conflict() {
    let user = sample_user("mine@example.com");
    let service = MockStore::new(Fault::DuplicateOnWrite)
        .with_user(user.clone())
        .service();

    let patch = UserPatch {
        email: Some("theirs@example.com".into()),
        ..Default::default()
    };
    let err = service.update_user(user.id, patch).await.unwrap_err();

    assert!(matches!(err, DomainError::EmailAlreadyExists { .. }));
}

#[tokio::test]
async fn store_failures_become_database_errors() {
    let store = MockStore::new(Fault::Database);
    let service = store.service();

    let err = service.get_user(Uuid::now_v7()).await.unwrap_err();
    assert!(matches!(err, DomainError::Database { ref message } if message.contains("connection reset")));

    let err = service
        .create_user(new_user("A", "B", "a@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Database { .. }));
    assert_eq!(*store.commits.lock().unwrap(), 0);
}

#[tokio::test]
async fn validation_runs_before_the_store_is_touched() {
    let store = MockStore::new(Fault::Database);
    let service = store.service();

    let err = service
        .create_user(new_user("A", "B", "invalid"))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation { .. }));
}
