use std::collections::BTreeMap;

use shared_types::{CertificateId, ParticipantId};

use super::ParticipantService;
use super::dto::{AddParticipantsResultDTO, ParticipantResponseDTO};
use crate::model::certificate::Certificate;
use crate::model::participant::Participant;
use crate::service::error::{EntityNotFoundError, ServiceError};
use crate::util::anchor::extract_anchors;

impl ParticipantService {
    /// Rows must carry exactly the placeholder anchors of the certificate design (plus `email`)
    pub async fn add_participants(
        &self,
        certificate_id: &CertificateId,
        rows: Vec<BTreeMap<String, String>>,
    ) -> Result<AddParticipantsResultDTO, ServiceError> {
        let anchors = self.get_placeholders(certificate_id).await?;

        Ok(self
            .participant_store
            .add_participants(certificate_id, &anchors, rows)
            .await?
            .into())
    }

    pub async fn get_participants(
        &self,
        certificate_id: &CertificateId,
    ) -> Result<Vec<ParticipantResponseDTO>, ServiceError> {
        self.get_certificate(certificate_id).await?;

        Ok(self
            .participant_store
            .get_participants_by_certificate(certificate_id)
            .await?
            .into_iter()
            .map(ParticipantResponseDTO::from)
            .collect())
    }

    pub async fn get_participant(
        &self,
        id: &ParticipantId,
    ) -> Result<ParticipantResponseDTO, ServiceError> {
        Ok(self.get_participant_model(id).await?.into())
    }

    pub async fn edit_participant(
        &self,
        id: &ParticipantId,
        new_data: BTreeMap<String, String>,
    ) -> Result<(), ServiceError> {
        let participant = self.get_participant_model(id).await?;
        let anchors = self.get_placeholders(&participant.certificate_id).await?;

        let superseded = self
            .participant_store
            .edit_participant(id, &anchors, new_data)
            .await?;

        if let Some(url) = superseded {
            self.artifact_publisher.delete_by_url(&url).await;
        }
        Ok(())
    }

    /// Revoked participants are excluded from rendering, archives and distribution
    pub async fn revoke_participant(&self, id: &ParticipantId) -> Result<(), ServiceError> {
        self.get_participant_model(id).await?;
        self.participant_store.set_revoked(id, true).await?;

        tracing::info!(participant_id = %id, "Participant revoked");
        Ok(())
    }

    pub async fn delete_participant(&self, id: &ParticipantId) -> Result<(), ServiceError> {
        let participant = self.get_participant_model(id).await?;
        self.participant_store.delete_participant(id).await?;

        if let Some(url) = &participant.certificate_url {
            self.artifact_publisher.delete_by_url(url).await;
        }
        Ok(())
    }

    pub async fn find_orphaned_data(
        &self,
        certificate_id: &CertificateId,
    ) -> Result<Vec<ParticipantId>, ServiceError> {
        self.participant_store
            .find_orphaned_data(certificate_id)
            .await
    }

    pub async fn purge_orphaned_data(
        &self,
        certificate_id: &CertificateId,
    ) -> Result<Vec<ParticipantId>, ServiceError> {
        self.participant_store
            .purge_orphaned_data(certificate_id)
            .await
    }

    async fn get_participant_model(&self, id: &ParticipantId) -> Result<Participant, ServiceError> {
        Ok(self
            .participant_store
            .get_participant(id)
            .await?
            .ok_or(EntityNotFoundError::Participant(*id))?)
    }

    async fn get_certificate(&self, id: &CertificateId) -> Result<Certificate, ServiceError> {
        Ok(self
            .certificate_repository
            .get(id)
            .await?
            .ok_or(EntityNotFoundError::Certificate(*id))?)
    }

    async fn get_placeholders(&self, id: &CertificateId) -> Result<Vec<String>, ServiceError> {
        let certificate = self.get_certificate(id).await?;
        Ok(extract_anchors(&certificate.design)?.placeholders)
    }
}
