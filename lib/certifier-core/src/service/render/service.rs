use std::collections::HashMap;

use ct_codecs::{Base64, Encoder};
use shared_types::{CertificateId, ParticipantId};
use tokio::time::{Instant, timeout, timeout_at};

use super::RenderService;
use super::dto::{ParticipantRenderResultDTO, RenderResultDTO};
use crate::model::certificate::{Certificate, UpdateCertificateRequest};
use crate::model::participant::{EmailStatus, Participant};
use crate::proto::artifact_publisher::ArchiveEntry;
use crate::provider::renderer::dto::{
    RenderBatchRequestDTO, RenderCertificateDTO, RenderMode, RenderStatus,
    RenderThumbnailRequestDTO, RenderedParticipantDTO,
};
use crate::provider::renderer::error::RendererError;
use crate::service::error::{
    BusinessLogicError, EntityNotFoundError, InfrastructureError, ServiceError,
};
use crate::util::anchor::{DesignAnchors, extract_anchors};

impl RenderService {
    /// Renders, packages and publishes the certificate of every selected participant, then
    /// rebuilds the archive.
    ///
    /// Without `renew_all` only participants that were neither delivered nor rendered before are
    /// selected. Per-participant failures are part of the result. Hitting the batch deadline
    /// fails the call, URLs persisted before that stay in place.
    pub async fn render(
        &self,
        certificate_id: &CertificateId,
        renew_all: bool,
    ) -> Result<RenderResultDTO, ServiceError> {
        let certificate = self.get_certificate(certificate_id).await?;
        if !certificate.is_signed {
            return Err(BusinessLogicError::CertificateNotSigned(*certificate_id).into());
        }
        let anchors = extract_anchors(&certificate.design)?;

        if !certificate.is_distributed {
            self.certificate_repository
                .update(certificate_id, UpdateCertificateRequest::distributed())
                .await?;
        }

        let selected: Vec<Participant> = self
            .participant_store
            .get_participants_by_certificate(certificate_id)
            .await?
            .into_iter()
            .filter(|participant| is_selected(participant, renew_all))
            .collect();

        if selected.is_empty() {
            tracing::info!(%certificate_id, renew_all, "Nothing to render");
            return Ok(RenderResultDTO {
                results: vec![],
                archive_url: certificate.archive_url,
            });
        }

        let ids: Vec<ParticipantId> = selected.iter().map(|participant| participant.id).collect();
        self.participant_store.reset_statuses(&ids).await?;

        tracing::info!(%certificate_id, participants = selected.len(), renew_all, "Rendering certificates");

        let deadline = Instant::now() + self.batch_timeout;
        let results = timeout_at(
            deadline,
            self.render_participants(&certificate, &anchors, selected),
        )
        .await
        .map_err(|_| {
            tracing::warn!(%certificate_id, timeout = ?self.batch_timeout, "Render batch timed out");
            InfrastructureError::Timeout("render")
        })??;

        let archive_url = self.rebuild_archive(&certificate).await?;

        let succeeded = results.iter().filter(|result| result.is_success()).count();
        tracing::info!(
            %certificate_id,
            succeeded,
            failed = results.len() - succeeded,
            "Render finished"
        );

        Ok(RenderResultDTO {
            results,
            archive_url,
        })
    }

    /// Renders the design preview and replaces the stored thumbnail. Returns the new proxy URL.
    pub async fn render_thumbnail(
        &self,
        certificate_id: &CertificateId,
    ) -> Result<String, ServiceError> {
        let certificate = self.get_certificate(certificate_id).await?;

        let request = RenderThumbnailRequestDTO {
            certificate: self.render_certificate(&certificate).await?,
            mode: RenderMode::Thumbnail,
        };

        let rendered = timeout(self.thumbnail_timeout, self.renderer.render_thumbnail(request))
            .await
            .map_err(|_| InfrastructureError::Timeout("thumbnail"))??;

        let image = match (rendered.status, rendered.image_base64) {
            (RenderStatus::Success, Some(image)) => image,
            _ => {
                let error = rendered
                    .error
                    .unwrap_or_else(|| "no image returned".to_string());
                return Err(RendererError::Failed(error).into());
            }
        };

        let url = self
            .artifact_publisher
            .publish_thumbnail(certificate_id, &image)
            .await?;
        self.certificate_repository
            .update(
                certificate_id,
                UpdateCertificateRequest::thumbnail_url(Some(url.to_owned())),
            )
            .await?;

        if let Some(previous) = &certificate.thumbnail_url {
            self.artifact_publisher.delete_by_url(previous).await;
        }

        tracing::info!(%certificate_id, "Thumbnail rendered");
        Ok(url)
    }

    async fn render_participants(
        &self,
        certificate: &Certificate,
        anchors: &DesignAnchors,
        selected: Vec<Participant>,
    ) -> Result<Vec<ParticipantRenderResultDTO>, ServiceError> {
        let mut results: HashMap<ParticipantId, ParticipantRenderResultDTO> = HashMap::new();
        let mut documents = vec![];
        let mut renderable = vec![];
        for participant in &selected {
            match &participant.data {
                Some(data) => {
                    documents.push(data.to_document());
                    renderable.push(participant.id);
                }
                None => {
                    results.insert(
                        participant.id,
                        ParticipantRenderResultDTO::error(participant.id, "participant data missing"),
                    );
                }
            }
        }

        let qr_codes = if anchors.has_qr_anchor && !renderable.is_empty() {
            self.qr_code_generator
                .generate(renderable.to_owned())
                .await
                .into_iter()
                .map(|(id, code)| (id.to_string(), code))
                .collect()
        } else {
            HashMap::new()
        };

        let rendered = if documents.is_empty() {
            vec![]
        } else {
            self.renderer
                .render_batch(RenderBatchRequestDTO {
                    certificate: self.render_certificate(certificate).await?,
                    participants: documents,
                    qr_codes,
                })
                .await?
        };

        let by_id: HashMap<String, &Participant> = selected
            .iter()
            .filter(|participant| participant.data.is_some())
            .map(|participant| (participant.id.to_string(), participant))
            .collect();

        for output in rendered {
            let Some(participant) = by_id.get(&output.participant_id) else {
                tracing::warn!(
                    certificate_id = %certificate.id,
                    participant_id = %output.participant_id,
                    "Renderer returned unknown participant"
                );
                continue;
            };
            if results.contains_key(&participant.id) {
                tracing::warn!(participant_id = %participant.id, "Duplicate render result ignored");
                continue;
            }

            let result = self.publish_result(certificate, participant, output).await?;
            results.insert(participant.id, result);
        }

        Ok(selected
            .iter()
            .map(|participant| {
                results.remove(&participant.id).unwrap_or_else(|| {
                    ParticipantRenderResultDTO::error(participant.id, "no result returned by renderer")
                })
            })
            .collect())
    }

    /// Persists the new URL before deleting the superseded artifact. A failed render keeps the
    /// previous URL.
    async fn publish_result(
        &self,
        certificate: &Certificate,
        participant: &Participant,
        output: RenderedParticipantDTO,
    ) -> Result<ParticipantRenderResultDTO, ServiceError> {
        let image = match (output.status, output.image_base64) {
            (RenderStatus::Success, Some(image)) => image,
            (RenderStatus::Success, None) => {
                return Ok(ParticipantRenderResultDTO::error(
                    participant.id,
                    "no image returned",
                ));
            }
            (RenderStatus::Error, _) => {
                let error = output.error.unwrap_or_else(|| "render failed".to_string());
                tracing::warn!(participant_id = %participant.id, %error, "Participant render failed");
                return Ok(ParticipantRenderResultDTO::error(participant.id, error));
            }
        };

        let url = match self
            .artifact_publisher
            .publish_certificate(&certificate.id, &image)
            .await
        {
            Ok(url) => url,
            Err(error) => {
                tracing::warn!(participant_id = %participant.id, %error, "Failed to publish certificate");
                return Ok(ParticipantRenderResultDTO::error(
                    participant.id,
                    error.to_string(),
                ));
            }
        };

        self.participant_store
            .set_certificate_url(&participant.id, Some(url.to_owned()))
            .await?;

        if let Some(previous) = &participant.certificate_url {
            self.artifact_publisher.delete_by_url(previous).await;
        }

        Ok(ParticipantRenderResultDTO::success(participant.id, url))
    }

    /// Archives every active participant currently holding a certificate. Without any, the
    /// existing archive is kept.
    async fn rebuild_archive(
        &self,
        certificate: &Certificate,
    ) -> Result<Option<String>, ServiceError> {
        let entries: Vec<ArchiveEntry> = self
            .participant_store
            .get_participants_by_certificate(&certificate.id)
            .await?
            .into_iter()
            .filter(|participant| !participant.is_revoked)
            .filter_map(|participant| {
                let url = participant.certificate_url.filter(|url| !url.trim().is_empty())?;
                Some(ArchiveEntry {
                    file_name: format!("{}.pdf", participant.id),
                    url,
                })
            })
            .collect();

        if entries.is_empty() {
            return Ok(certificate.archive_url.to_owned());
        }

        if let Some(previous) = &certificate.archive_url {
            self.artifact_publisher.delete_by_url(previous).await;
        }

        let archive_url = match self
            .artifact_publisher
            .publish_archive(&certificate.id, entries)
            .await
        {
            Ok(url) => url,
            Err(error) => {
                tracing::warn!(certificate_id = %certificate.id, %error, "Failed to publish archive");
                None
            }
        };

        self.certificate_repository
            .update(
                &certificate.id,
                UpdateCertificateRequest::archive_url(archive_url.to_owned()),
            )
            .await?;

        Ok(archive_url)
    }

    async fn render_certificate(
        &self,
        certificate: &Certificate,
    ) -> Result<RenderCertificateDTO, ServiceError> {
        let signatures = self
            .signature_service
            .decrypt_signatures(&certificate.id)
            .await?
            .into_iter()
            .map(|(signer_id, image)| Ok((signer_id.to_string(), Base64::encode_to_string(image)?)))
            .collect::<Result<_, ServiceError>>()?;

        Ok(RenderCertificateDTO {
            id: certificate.id,
            name: certificate.name.to_owned(),
            design: certificate.design.to_owned(),
            signatures,
        })
    }

    async fn get_certificate(&self, id: &CertificateId) -> Result<Certificate, ServiceError> {
        Ok(self
            .certificate_repository
            .get(id)
            .await?
            .ok_or(EntityNotFoundError::Certificate(*id))?)
    }
}

fn is_selected(participant: &Participant, renew_all: bool) -> bool {
    if participant.is_revoked {
        return false;
    }

    renew_all
        || (participant.email_status != EmailStatus::Success && !participant.has_certificate_url())
}
