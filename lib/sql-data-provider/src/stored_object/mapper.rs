use certifier_core::model::stored_object::StoredObject;
use sea_orm::Set;

use crate::entity::stored_object;

impl From<stored_object::Model> for StoredObject {
    fn from(value: stored_object::Model) -> Self {
        Self {
            id: value.id,
            created_date: value.created_date,
            bucket: value.bucket,
            path: value.path,
            content_type: value.content_type,
            content: value.content,
        }
    }
}

impl From<StoredObject> for stored_object::ActiveModel {
    fn from(value: StoredObject) -> Self {
        Self {
            id: Set(value.id),
            created_date: Set(value.created_date),
            bucket: Set(value.bucket),
            path: Set(value.path),
            content_type: Set(value.content_type),
            content: Set(value.content),
        }
    }
}
