use async_trait::async_trait;
use autometrics::autometrics;
use certifier_core::model::stored_object::StoredObject;
use certifier_core::repository::error::DataLayerError;
use certifier_core::repository::object_repository::ObjectRepository;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use super::StoredObjectProvider;
use crate::entity::stored_object;
use crate::mapper::to_data_layer_error;

#[autometrics]
#[async_trait]
impl ObjectRepository for StoredObjectProvider {
    async fn put(&self, object: StoredObject) -> Result<(), DataLayerError> {
        stored_object::Entity::insert::<stored_object::ActiveModel>(object.into())
            .on_conflict(
                OnConflict::columns([stored_object::Column::Bucket, stored_object::Column::Path])
                    .update_columns([
                        stored_object::Column::CreatedDate,
                        stored_object::Column::ContentType,
                        stored_object::Column::Content,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        Ok(())
    }

    async fn get(&self, bucket: &str, path: &str) -> Result<Option<StoredObject>, DataLayerError> {
        Ok(stored_object::Entity::find()
            .filter(stored_object::Column::Bucket.eq(bucket))
            .filter(stored_object::Column::Path.eq(path))
            .one(&self.db)
            .await
            .map_err(to_data_layer_error)?
            .map(StoredObject::from))
    }

    async fn delete(&self, bucket: &str, path: &str) -> Result<(), DataLayerError> {
        stored_object::Entity::delete_many()
            .filter(stored_object::Column::Bucket.eq(bucket))
            .filter(stored_object::Column::Path.eq(path))
            .exec(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        Ok(())
    }

    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, DataLayerError> {
        let paths: Vec<String> = stored_object::Entity::find()
            .select_only()
            .column(stored_object::Column::Path)
            .filter(stored_object::Column::Bucket.eq(bucket))
            .filter(stored_object::Column::Path.starts_with(prefix))
            .order_by_asc(stored_object::Column::Path)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        // LIKE treats `_` and `%` as wildcards
        Ok(paths
            .into_iter()
            .filter(|path| path.starts_with(prefix))
            .collect())
    }
}
