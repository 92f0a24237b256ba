use shared_types::CertificateId;
use time::OffsetDateTime;

use super::CertificateService;
use super::dto::{
    CertificateResponseDTO, CreateCertificateRequestDTO, UpdateCertificateRequestDTO,
    UpdateCertificateResultDTO,
};
use super::mapper::certificate_response_from_model;
use crate::model::certificate::{Certificate, UpdateCertificateRequest};
use crate::service::error::{EntityNotFoundError, ServiceError, ValidationError};
use crate::util::anchor::extract_anchors;

impl CertificateService {
    /// Creates the certificate and requests a signature from every signer anchor of the design
    pub async fn create_certificate(
        &self,
        request: CreateCertificateRequestDTO,
    ) -> Result<CertificateId, ServiceError> {
        if request.name.trim().is_empty() {
            return Err(ValidationError::BlankCertificateName.into());
        }
        let anchors = extract_anchors(&request.design)?;

        let now = OffsetDateTime::now_utc();
        let certificate = Certificate {
            id: CertificateId::new_v4(),
            created_date: now,
            last_modified: now,
            name: request.name,
            design: request.design,
            created_by: request.created_by,
            // no signers means nothing to wait for
            is_signed: anchors.signers.is_empty(),
            is_distributed: false,
            archive_url: None,
            thumbnail_url: None,
        };

        let id = self
            .certificate_repository
            .create(certificate.to_owned())
            .await?;

        self.signature_service
            .reconcile_signers(&certificate, &anchors.signers)
            .await?;

        tracing::info!(certificate_id = %id, signers = anchors.signers.len(), "Certificate created");
        Ok(id)
    }

    pub async fn get_certificate(
        &self,
        id: &CertificateId,
    ) -> Result<CertificateResponseDTO, ServiceError> {
        let certificate = self.get_certificate_model(id).await?;
        let anchors = extract_anchors(&certificate.design)?;
        let participants = self
            .participant_store
            .get_participants_by_certificate(id)
            .await?;

        Ok(certificate_response_from_model(
            certificate,
            anchors,
            &participants,
        ))
    }

    /// Persists name and design changes. A new design reconciles the signature rows and prunes
    /// participant fields of removed anchors.
    pub async fn update_certificate(
        &self,
        id: &CertificateId,
        request: UpdateCertificateRequestDTO,
    ) -> Result<UpdateCertificateResultDTO, ServiceError> {
        let certificate = self.get_certificate_model(id).await?;

        if request
            .name
            .as_ref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(ValidationError::BlankCertificateName.into());
        }

        let anchors = request
            .design
            .as_deref()
            .map(extract_anchors)
            .transpose()?;

        self.certificate_repository
            .update(
                id,
                UpdateCertificateRequest {
                    name: request.name,
                    design: request.design,
                    ..Default::default()
                },
            )
            .await?;

        let Some(anchors) = anchors else {
            return Ok(UpdateCertificateResultDTO::default());
        };

        let reconciled = self
            .signature_service
            .reconcile_signers(&certificate, &anchors.signers)
            .await?;
        let pruned_participants = self
            .participant_store
            .cleanup_deleted_anchors(id, &anchors.placeholders)
            .await?;

        Ok(UpdateCertificateResultDTO {
            added_signers: reconciled.added,
            removed_signers: reconciled.removed,
            pruned_participants,
        })
    }

    /// Removes the certificate with its signatures, participants and stored artifacts
    pub async fn delete_certificate(&self, id: &CertificateId) -> Result<(), ServiceError> {
        let certificate = self.get_certificate_model(id).await?;

        let participants = self
            .participant_store
            .get_participants_by_certificate(id)
            .await?;
        for participant in participants {
            if let Some(url) = &participant.certificate_url {
                self.artifact_publisher.delete_by_url(url).await;
            }
            self.participant_store
                .delete_participant(&participant.id)
                .await?;
        }
        self.participant_store.purge_orphaned_data(id).await?;

        for signature in self.signature_repository.get_by_certificate(id).await? {
            self.signature_repository
                .delete(id, &signature.signer_id)
                .await?;
        }

        for url in [&certificate.archive_url, &certificate.thumbnail_url]
            .into_iter()
            .flatten()
        {
            self.artifact_publisher.delete_by_url(url).await;
        }

        self.certificate_repository.delete(id).await?;
        tracing::info!(certificate_id = %id, "Certificate deleted");
        Ok(())
    }

    pub(crate) async fn get_certificate_model(
        &self,
        id: &CertificateId,
    ) -> Result<Certificate, ServiceError> {
        Ok(self
            .certificate_repository
            .get(id)
            .await?
            .ok_or(EntityNotFoundError::Certificate(*id))?)
    }
}
