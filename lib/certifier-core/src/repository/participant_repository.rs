use async_trait::async_trait;
use shared_types::{CertificateId, ParticipantId};

use crate::model::participant::{Participant, UpdateParticipantRequest};
use crate::repository::error::DataLayerError;

/// Index store of participants
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    async fn create(&self, request: Participant) -> Result<ParticipantId, DataLayerError>;

    async fn get(&self, id: &ParticipantId) -> Result<Option<Participant>, DataLayerError>;

    async fn get_by_certificate(
        &self,
        certificate_id: &CertificateId,
    ) -> Result<Vec<Participant>, DataLayerError>;

    async fn update(
        &self,
        id: &ParticipantId,
        request: UpdateParticipantRequest,
    ) -> Result<(), DataLayerError>;

    /// Applies the same update to every listed participant
    async fn update_many(
        &self,
        ids: &[ParticipantId],
        request: UpdateParticipantRequest,
    ) -> Result<(), DataLayerError>;

    async fn delete(&self, id: &ParticipantId) -> Result<(), DataLayerError>;
}
