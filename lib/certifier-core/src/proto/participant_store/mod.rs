//! Participant record split across the index store and the document store.
//!
//! Both halves share one generated id. There is no transaction spanning the two stores: every
//! operation documents what is left behind when one of the writes fails.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use shared_types::{CertificateId, ParticipantId};
use time::OffsetDateTime;

use crate::model::participant::{
    DOCUMENT_CERTIFICATE_ID_KEY, DOCUMENT_EMAIL_KEY, DOCUMENT_ID_KEY, EmailStatus, Participant,
    ParticipantData, UpdateParticipantRequest, is_reserved_key,
};
use crate::repository::participant_data_repository::ParticipantDataRepository;
use crate::repository::participant_repository::ParticipantRepository;
use crate::service::error::{EntityNotFoundError, ServiceError, ValidationError};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddParticipantsResult {
    pub created: Vec<ParticipantId>,
    pub failed: Vec<FailedParticipant>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedParticipant {
    pub id: ParticipantId,
    pub error: String,
}

#[derive(Clone)]
pub struct ParticipantStore {
    participant_repository: Arc<dyn ParticipantRepository>,
    participant_data_repository: Arc<dyn ParticipantDataRepository>,
}

impl ParticipantStore {
    pub fn new(
        participant_repository: Arc<dyn ParticipantRepository>,
        participant_data_repository: Arc<dyn ParticipantDataRepository>,
    ) -> Self {
        Self {
            participant_repository,
            participant_data_repository,
        }
    }

    /// Validates all rows, then writes the document batch followed by the index rows.
    ///
    /// A failed document write fails the call and creates nothing. Index rows are written one
    /// by one and failures end up in [`AddParticipantsResult::failed`], leaving their document
    /// rows orphaned (see [`Self::find_orphaned_data`]).
    pub async fn add_participants(
        &self,
        certificate_id: &CertificateId,
        anchors: &[String],
        rows: Vec<BTreeMap<String, String>>,
    ) -> Result<AddParticipantsResult, ServiceError> {
        if rows.is_empty() {
            return Err(ValidationError::EmptyParticipantList.into());
        }

        let data = rows
            .into_iter()
            .enumerate()
            .map(|(row, values)| {
                let values = validate_row(row, anchors, values)?;
                Ok(ParticipantData {
                    id: ParticipantId::new_v4(),
                    certificate_id: *certificate_id,
                    values,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        let ids: Vec<ParticipantId> = data.iter().map(|data| data.id).collect();
        self.participant_data_repository.create_many(data).await?;

        let mut result = AddParticipantsResult::default();
        for id in ids {
            let now = OffsetDateTime::now_utc();
            let participant = Participant {
                id,
                certificate_id: *certificate_id,
                created_date: now,
                last_modified: now,
                is_revoked: false,
                certificate_url: None,
                email_status: EmailStatus::Pending,
                is_downloaded: false,
                data: None,
            };

            match self.participant_repository.create(participant).await {
                Ok(_) => result.created.push(id),
                Err(error) => {
                    tracing::warn!(%certificate_id, participant_id = %id, %error, "Failed to create participant index row");
                    result.failed.push(FailedParticipant {
                        id,
                        error: error.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            %certificate_id,
            created = result.created.len(),
            failed = result.failed.len(),
            "Participants added"
        );
        Ok(result)
    }

    /// Index rows joined with their document rows; rows without a document keep `data: None`
    pub async fn get_participants_by_certificate(
        &self,
        certificate_id: &CertificateId,
    ) -> Result<Vec<Participant>, ServiceError> {
        let participants = self
            .participant_repository
            .get_by_certificate(certificate_id)
            .await?;
        let mut data: HashMap<ParticipantId, ParticipantData> = self
            .participant_data_repository
            .get_by_certificate(certificate_id)
            .await?
            .into_iter()
            .map(|data| (data.id, data))
            .collect();

        Ok(participants
            .into_iter()
            .map(|mut participant| {
                participant.data = data.remove(&participant.id);
                if participant.data.is_none() {
                    tracing::warn!(participant_id = %participant.id, "Participant without data record");
                }
                participant
            })
            .collect())
    }

    pub async fn get_participant(
        &self,
        id: &ParticipantId,
    ) -> Result<Option<Participant>, ServiceError> {
        let Some(mut participant) = self.participant_repository.get(id).await? else {
            return Ok(None);
        };
        participant.data = self.participant_data_repository.get(id).await?;
        Ok(Some(participant))
    }

    /// Strips keys that are neither reserved nor current anchors from every document row.
    ///
    /// Failing rows are logged and skipped. Returns the number of pruned rows.
    pub async fn cleanup_deleted_anchors(
        &self,
        certificate_id: &CertificateId,
        anchors: &[String],
    ) -> Result<usize, ServiceError> {
        let data = self
            .participant_data_repository
            .get_by_certificate(certificate_id)
            .await?;

        let mut pruned = 0;
        for row in data {
            let stale: Vec<String> = row
                .unknown_keys(anchors)
                .into_iter()
                .map(str::to_owned)
                .collect();
            if stale.is_empty() {
                continue;
            }

            match self
                .participant_data_repository
                .remove_keys(&row.id, stale)
                .await
            {
                Ok(()) => pruned += 1,
                Err(error) => {
                    tracing::warn!(participant_id = %row.id, %error, "Failed to prune participant data");
                }
            }
        }

        if pruned > 0 {
            tracing::info!(%certificate_id, pruned, "Removed stale participant fields");
        }
        Ok(pruned)
    }

    /// Writes the provided fields only.
    ///
    /// When an anchor value of an already rendered participant changes, the certificate URL is
    /// cleared and the status reset so the next render picks the participant up again. The
    /// superseded URL is returned for the caller to delete. Otherwise the index timestamp bump
    /// is best effort.
    pub async fn edit_participant(
        &self,
        id: &ParticipantId,
        anchors: &[String],
        new_data: BTreeMap<String, String>,
    ) -> Result<Option<String>, ServiceError> {
        if new_data.is_empty() {
            return Err(ValidationError::InvalidParticipantEdit("no fields given".to_string()).into());
        }

        for (key, value) in &new_data {
            let is_anchor = anchors.contains(key);
            if !is_anchor && key != DOCUMENT_EMAIL_KEY {
                return Err(ValidationError::InvalidParticipantEdit(format!(
                    "field `{key}` cannot be edited"
                ))
                .into());
            }
            if is_anchor && value.trim().is_empty() {
                return Err(ValidationError::InvalidParticipantEdit(format!(
                    "field `{key}` must not be blank"
                ))
                .into());
            }
        }

        let participant = self
            .get_participant(id)
            .await?
            .ok_or(EntityNotFoundError::Participant(*id))?;

        let changes_render = new_data.iter().any(|(key, value)| {
            anchors.contains(key)
                && participant
                    .data
                    .as_ref()
                    .and_then(|data| data.values.get(key))
                    != Some(value)
        });

        self.participant_data_repository
            .set_values(id, new_data)
            .await?;

        if changes_render && participant.has_certificate_url() {
            self.participant_repository
                .update(
                    id,
                    UpdateParticipantRequest {
                        certificate_url: Some(None),
                        ..UpdateParticipantRequest::reset_status()
                    },
                )
                .await?;

            tracing::info!(participant_id = %id, "Rendered certificate invalidated by edit");
            return Ok(participant.certificate_url);
        }

        if let Err(error) = self
            .participant_repository
            .update(id, UpdateParticipantRequest::default())
            .await
        {
            tracing::warn!(participant_id = %id, %error, "Failed to touch participant index row");
        }
        Ok(None)
    }

    pub async fn reset_statuses(&self, ids: &[ParticipantId]) -> Result<(), ServiceError> {
        if ids.is_empty() {
            return Ok(());
        }

        Ok(self
            .participant_repository
            .update_many(ids, UpdateParticipantRequest::reset_status())
            .await?)
    }

    pub async fn set_certificate_url(
        &self,
        id: &ParticipantId,
        url: Option<String>,
    ) -> Result<(), ServiceError> {
        Ok(self
            .participant_repository
            .update(
                id,
                UpdateParticipantRequest {
                    certificate_url: Some(url),
                    ..Default::default()
                },
            )
            .await?)
    }

    pub async fn set_email_status(
        &self,
        id: &ParticipantId,
        status: EmailStatus,
    ) -> Result<(), ServiceError> {
        Ok(self
            .participant_repository
            .update(
                id,
                UpdateParticipantRequest {
                    email_status: Some(status),
                    ..Default::default()
                },
            )
            .await?)
    }

    pub async fn mark_downloaded(&self, id: &ParticipantId) -> Result<(), ServiceError> {
        Ok(self
            .participant_repository
            .update(
                id,
                UpdateParticipantRequest {
                    is_downloaded: Some(true),
                    email_status: Some(EmailStatus::Downloaded),
                    ..Default::default()
                },
            )
            .await?)
    }

    pub async fn set_revoked(
        &self,
        id: &ParticipantId,
        is_revoked: bool,
    ) -> Result<(), ServiceError> {
        Ok(self
            .participant_repository
            .update(
                id,
                UpdateParticipantRequest {
                    is_revoked: Some(is_revoked),
                    ..Default::default()
                },
            )
            .await?)
    }

    /// Deletes the index row, then the document row. A failing document delete leaves an orphan.
    pub async fn delete_participant(&self, id: &ParticipantId) -> Result<(), ServiceError> {
        self.participant_repository.delete(id).await?;

        if let Err(error) = self.participant_data_repository.delete(id).await {
            tracing::warn!(participant_id = %id, %error, "Participant data left orphaned");
        }
        Ok(())
    }

    /// Document rows of the certificate without an index row
    pub async fn find_orphaned_data(
        &self,
        certificate_id: &CertificateId,
    ) -> Result<Vec<ParticipantId>, ServiceError> {
        let indexed: HashSet<ParticipantId> = self
            .participant_repository
            .get_by_certificate(certificate_id)
            .await?
            .into_iter()
            .map(|participant| participant.id)
            .collect();

        Ok(self
            .participant_data_repository
            .get_by_certificate(certificate_id)
            .await?
            .into_iter()
            .map(|data| data.id)
            .filter(|id| !indexed.contains(id))
            .collect())
    }

    pub async fn purge_orphaned_data(
        &self,
        certificate_id: &CertificateId,
    ) -> Result<Vec<ParticipantId>, ServiceError> {
        let orphans = self.find_orphaned_data(certificate_id).await?;
        if orphans.is_empty() {
            return Ok(orphans);
        }

        self.participant_data_repository
            .delete_many(&orphans)
            .await?;
        tracing::info!(%certificate_id, purged = orphans.len(), "Purged orphaned participant data");
        Ok(orphans)
    }
}

fn validate_row(
    row: usize,
    anchors: &[String],
    mut values: BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, ValidationError> {
    values.remove(DOCUMENT_ID_KEY);
    values.remove(DOCUMENT_CERTIFICATE_ID_KEY);

    if let Some(field) = anchors
        .iter()
        .find(|anchor| values.get(*anchor).is_none_or(|value| value.trim().is_empty()))
    {
        return Err(ValidationError::MissingAnchorField {
            row,
            field: field.to_owned(),
        });
    }

    if let Some(field) = values
        .keys()
        .find(|key| !is_reserved_key(key) && !anchors.contains(key))
    {
        return Err(ValidationError::UnknownParticipantField {
            row,
            field: field.to_owned(),
        });
    }

    Ok(values)
}
