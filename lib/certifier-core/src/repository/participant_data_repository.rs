use std::collections::BTreeMap;

use async_trait::async_trait;
use shared_types::{CertificateId, ParticipantId};

use crate::model::participant::ParticipantData;
use crate::repository::error::DataLayerError;

/// Document store of participant anchor data
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ParticipantDataRepository: Send + Sync {
    /// Inserts the whole batch or nothing
    async fn create_many(&self, request: Vec<ParticipantData>) -> Result<(), DataLayerError>;

    async fn get(&self, id: &ParticipantId) -> Result<Option<ParticipantData>, DataLayerError>;

    async fn get_by_certificate(
        &self,
        certificate_id: &CertificateId,
    ) -> Result<Vec<ParticipantData>, DataLayerError>;

    /// Merges the given values into the stored document
    async fn set_values(
        &self,
        id: &ParticipantId,
        values: BTreeMap<String, String>,
    ) -> Result<(), DataLayerError>;

    async fn remove_keys(
        &self,
        id: &ParticipantId,
        keys: Vec<String>,
    ) -> Result<(), DataLayerError>;

    async fn delete(&self, id: &ParticipantId) -> Result<(), DataLayerError>;

    async fn delete_many(&self, ids: &[ParticipantId]) -> Result<(), DataLayerError>;
}
