use async_trait::async_trait;

use crate::model::stored_object::StoredObject;
use crate::repository::error::DataLayerError;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ObjectRepository: Send + Sync {
    /// Replaces an existing object stored under the same bucket and path
    async fn put(&self, object: StoredObject) -> Result<(), DataLayerError>;

    async fn get(&self, bucket: &str, path: &str) -> Result<Option<StoredObject>, DataLayerError>;

    async fn delete(&self, bucket: &str, path: &str) -> Result<(), DataLayerError>;

    /// Paths of all objects in the bucket starting with `prefix`
    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, DataLayerError>;
}
