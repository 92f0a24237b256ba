use certifier_core::model::participant::{Participant, UpdateParticipantRequest};
use sea_orm::Set;
use time::OffsetDateTime;

use crate::entity::participant;

impl From<participant::Model> for Participant {
    fn from(value: participant::Model) -> Self {
        Self {
            id: value.id,
            certificate_id: value.certificate_id,
            created_date: value.created_date,
            last_modified: value.last_modified,
            is_revoked: value.is_revoked,
            certificate_url: value.certificate_url,
            email_status: value.email_status.into(),
            is_downloaded: value.is_downloaded,
            data: None,
        }
    }
}

impl From<Participant> for participant::ActiveModel {
    fn from(value: Participant) -> Self {
        Self {
            id: Set(value.id),
            certificate_id: Set(value.certificate_id),
            created_date: Set(value.created_date),
            last_modified: Set(value.last_modified),
            is_revoked: Set(value.is_revoked),
            certificate_url: Set(value.certificate_url),
            email_status: Set(value.email_status.into()),
            is_downloaded: Set(value.is_downloaded),
        }
    }
}

/// Columns to set, the primary key is left to the caller
pub(super) fn to_update_active_model(request: UpdateParticipantRequest) -> participant::ActiveModel {
    participant::ActiveModel {
        last_modified: Set(OffsetDateTime::now_utc()),
        is_revoked: request.is_revoked.map(Set).unwrap_or_default(),
        certificate_url: request.certificate_url.map(Set).unwrap_or_default(),
        email_status: request
            .email_status
            .map(|status| Set(status.into()))
            .unwrap_or_default(),
        is_downloaded: request.is_downloaded.map(Set).unwrap_or_default(),
        ..Default::default()
    }
}
