use super::dto::{AddParticipantsResultDTO, ParticipantResponseDTO};
use crate::model::participant::Participant;
use crate::proto::participant_store::AddParticipantsResult;

impl From<Participant> for ParticipantResponseDTO {
    fn from(value: Participant) -> Self {
        Self {
            id: value.id,
            certificate_id: value.certificate_id,
            created_date: value.created_date,
            last_modified: value.last_modified,
            is_revoked: value.is_revoked,
            certificate_url: value.certificate_url,
            email_status: value.email_status,
            is_downloaded: value.is_downloaded,
            data: value.data.map(|data| data.values).unwrap_or_default(),
        }
    }
}

impl From<AddParticipantsResult> for AddParticipantsResultDTO {
    fn from(value: AddParticipantsResult) -> Self {
        Self {
            created: value.created,
            failed: value.failed,
        }
    }
}
