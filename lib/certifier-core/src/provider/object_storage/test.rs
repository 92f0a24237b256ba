use std::sync::Arc;

use mockall::predicate::eq;

use super::*;
use crate::repository::object_repository::MockObjectRepository;

#[tokio::test]
async fn test_put_stores_object() {
    let mut object_repository = MockObjectRepository::new();
    object_repository
        .expect_put()
        .once()
        .withf(|object| {
            object.bucket == "certificates"
                && object.path == "a/b.pdf"
                && object.content == b"pdf"
                && object.content_type == "application/pdf"
        })
        .returning(|_| Ok(()));

    let storage = RepositoryObjectStorage::new(Arc::new(object_repository));
    storage
        .put("certificates", "a/b.pdf", b"pdf".to_vec(), "application/pdf")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_missing_object() {
    let mut object_repository = MockObjectRepository::new();
    object_repository
        .expect_get()
        .once()
        .with(eq("certificates"), eq("missing.pdf"))
        .returning(|_, _| Ok(None));

    let storage = RepositoryObjectStorage::new(Arc::new(object_repository));
    let result = storage.get("certificates", "missing.pdf").await;
    assert!(matches!(result, Err(ObjectStorageError::NotFound { .. })));
}

#[tokio::test]
async fn test_get_returns_content() {
    let mut object_repository = MockObjectRepository::new();
    object_repository.expect_get().once().returning(|bucket, path| {
        Ok(Some(StoredObject {
            id: ObjectId::new_v4(),
            created_date: OffsetDateTime::now_utc(),
            bucket: bucket.to_owned(),
            path: path.to_owned(),
            content_type: "image/jpeg".to_string(),
            content: vec![1, 2, 3],
        }))
    });

    let storage = RepositoryObjectStorage::new(Arc::new(object_repository));
    assert_eq!(storage.get("b", "p").await.unwrap(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_list_forwards_prefix() {
    let mut object_repository = MockObjectRepository::new();
    object_repository
        .expect_list()
        .once()
        .with(eq("certificates"), eq("c1/"))
        .returning(|_, _| Ok(vec!["c1/a.pdf".to_string(), "c1/b.zip".to_string()]));

    let storage = RepositoryObjectStorage::new(Arc::new(object_repository));
    assert_eq!(
        storage.list("certificates", "c1/").await.unwrap(),
        vec!["c1/a.pdf", "c1/b.zip"]
    );
}
