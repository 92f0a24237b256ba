use std::sync::Arc;

use async_trait::async_trait;
use shared_types::ObjectId;
use time::OffsetDateTime;

use crate::model::stored_object::StoredObject;
use crate::repository::object_repository::ObjectRepository;

pub mod error;
pub mod proxy;

use error::ObjectStorageError;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put(
        &self,
        bucket: &str,
        path: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ObjectStorageError>;

    async fn get(&self, bucket: &str, path: &str) -> Result<Vec<u8>, ObjectStorageError>;

    async fn delete(&self, bucket: &str, path: &str) -> Result<(), ObjectStorageError>;

    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, ObjectStorageError>;
}

/// Object storage backed by the `stored_object` table
pub struct RepositoryObjectStorage {
    object_repository: Arc<dyn ObjectRepository>,
}

impl RepositoryObjectStorage {
    pub fn new(object_repository: Arc<dyn ObjectRepository>) -> Self {
        Self { object_repository }
    }
}

#[async_trait]
impl ObjectStorage for RepositoryObjectStorage {
    async fn put(
        &self,
        bucket: &str,
        path: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ObjectStorageError> {
        tracing::debug!(bucket, path, size = content.len(), "Storing object");

        Ok(self
            .object_repository
            .put(StoredObject {
                id: ObjectId::new_v4(),
                created_date: OffsetDateTime::now_utc(),
                bucket: bucket.to_owned(),
                path: path.to_owned(),
                content_type: content_type.to_owned(),
                content,
            })
            .await?)
    }

    async fn get(&self, bucket: &str, path: &str) -> Result<Vec<u8>, ObjectStorageError> {
        self.object_repository
            .get(bucket, path)
            .await?
            .map(|object| object.content)
            .ok_or_else(|| ObjectStorageError::NotFound {
                bucket: bucket.to_owned(),
                path: path.to_owned(),
            })
    }

    async fn delete(&self, bucket: &str, path: &str) -> Result<(), ObjectStorageError> {
        tracing::debug!(bucket, path, "Deleting object");
        Ok(self.object_repository.delete(bucket, path).await?)
    }

    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, ObjectStorageError> {
        Ok(self.object_repository.list(bucket, prefix).await?)
    }
}

#[cfg(test)]
mod test;
