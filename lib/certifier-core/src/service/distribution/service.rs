use futures::stream::{self, StreamExt};
use shared_types::{CertificateId, ParticipantId};
use validator::ValidateEmail;

use super::DistributionService;
use super::dto::{
    BulkUpdateResultDTO, DistributionResultDTO, FailedParticipant,
    ParticipantDistributionResultDTO,
};
use crate::model::participant::{EmailStatus, Participant};
use crate::service::error::{
    BusinessLogicError, EntityNotFoundError, InfrastructureError, ServiceError,
};

impl DistributionService {
    /// Mails the certificate link to every active participant not delivered yet.
    ///
    /// Each attempt stores `SUCCESS` or `FAILED` on the participant. Results are listed in
    /// completion order.
    pub async fn distribute_by_mail(
        &self,
        certificate_id: &CertificateId,
    ) -> Result<DistributionResultDTO, ServiceError> {
        let certificate = self
            .certificate_repository
            .get(certificate_id)
            .await?
            .ok_or(EntityNotFoundError::Certificate(*certificate_id))?;
        if !certificate.is_distributed {
            return Err(BusinessLogicError::CertificateNotDistributed(*certificate_id).into());
        }

        let pending: Vec<Participant> = self
            .participant_store
            .get_participants_by_certificate(certificate_id)
            .await?
            .into_iter()
            .filter(|participant| {
                !participant.is_revoked && participant.email_status != EmailStatus::Success
            })
            .collect();

        let results: Vec<ParticipantDistributionResultDTO> = stream::iter(pending)
            .map(|participant| self.deliver(participant))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let sent = results
            .iter()
            .filter(|result| result.email_status == EmailStatus::Success)
            .count();
        tracing::info!(%certificate_id, sent, failed = results.len() - sent, "Certificates distributed");

        Ok(DistributionResultDTO { results })
    }

    /// Marks the participants delivered, each update independent of the others
    pub async fn mark_distributed(&self, ids: Vec<ParticipantId>) -> BulkUpdateResultDTO {
        let outcomes: Vec<(ParticipantId, Result<(), ServiceError>)> = stream::iter(ids)
            .map(|id| async move {
                let result = self
                    .participant_store
                    .set_email_status(&id, EmailStatus::Success)
                    .await;
                (id, result)
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut result = BulkUpdateResultDTO::default();
        for (id, outcome) in outcomes {
            match outcome {
                Ok(()) => result.updated.push(id),
                Err(error) => {
                    tracing::warn!(participant_id = %id, %error, "Failed to mark participant distributed");
                    result.failed.push(FailedParticipant {
                        id,
                        error: error.to_string(),
                    });
                }
            }
        }
        result
    }

    pub async fn mark_downloaded(&self, id: &ParticipantId) -> Result<(), ServiceError> {
        let participant = self
            .participant_store
            .get_participant(id)
            .await?
            .ok_or(EntityNotFoundError::Participant(*id))?;
        if participant.is_revoked {
            return Err(BusinessLogicError::ParticipantRevoked(*id).into());
        }

        self.participant_store.mark_downloaded(id).await
    }

    async fn deliver(&self, participant: Participant) -> ParticipantDistributionResultDTO {
        let (email_status, mut error) = match self.send(&participant).await {
            Ok(()) => (EmailStatus::Success, None),
            Err(error) => {
                tracing::warn!(participant_id = %participant.id, %error, "Certificate delivery failed");
                (EmailStatus::Failed, Some(error))
            }
        };

        if let Err(update_error) = self
            .participant_store
            .set_email_status(&participant.id, email_status)
            .await
        {
            tracing::warn!(participant_id = %participant.id, error = %update_error, "Failed to store email status");
            error.get_or_insert_with(|| update_error.to_string());
        }

        ParticipantDistributionResultDTO {
            participant_id: participant.id,
            email_status,
            error,
        }
    }

    async fn send(&self, participant: &Participant) -> Result<(), String> {
        let url = participant
            .certificate_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or("certificate not rendered")?;

        let email = participant
            .data
            .as_ref()
            .and_then(|data| data.email())
            .filter(|email| !email.is_empty())
            .ok_or("email missing")?;
        if !email.validate_email() {
            return Err(format!("invalid email `{email}`"));
        }

        self.mail_sender
            .send(email, url)
            .await
            .map_err(|error| ServiceError::from(InfrastructureError::Mail(error)).to_string())
    }
}
