use thiserror::Error;

use crate::repository::error::DataLayerError;

#[derive(Debug, Error)]
pub enum ObjectStorageError {
    #[error("Object `{bucket}/{path}` not found")]
    NotFound { bucket: String, path: String },

    #[error("URL `{0}` does not point to object storage")]
    ForeignUrl(String),

    #[error("Object storage data layer error: `{0}`")]
    DataLayerError(#[from] DataLayerError),
}
