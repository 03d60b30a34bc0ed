use super::memory_db;
use crate::config::Collation;
use crate::types::Person;

/// Verify that querying the database after closing the pool returns an error
/// rather than hanging or panicking.
#[tokio::test]
async fn test_people_by_name_after_pool_close_returns_error() {
    let db = memory_db(Collation::Folded).await;
    db.insert_person(&Person::default()).await.unwrap();

    db.pool().close().await;

    let result = db.people_by_name().await;
    assert!(
        result.is_err(),
        "people_by_name after pool close should return an error, got: {:?}",
        result
    );
}

#[tokio::test]
async fn test_insert_after_pool_close_returns_error() {
    let db = memory_db(Collation::Folded).await;

    db.pool().close().await;

    let result = db.insert_people(&[Person::default()]).await;
    assert!(result.is_err());
}
