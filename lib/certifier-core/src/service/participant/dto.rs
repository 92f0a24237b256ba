use std::collections::BTreeMap;

use shared_types::{CertificateId, ParticipantId};
use time::OffsetDateTime;

use crate::model::participant::EmailStatus;
pub use crate::proto::participant_store::FailedParticipant;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddParticipantsResultDTO {
    pub created: Vec<ParticipantId>,
    pub failed: Vec<FailedParticipant>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantResponseDTO {
    pub id: ParticipantId,
    pub certificate_id: CertificateId,
    pub created_date: OffsetDateTime,
    pub last_modified: OffsetDateTime,
    pub is_revoked: bool,
    pub certificate_url: Option<String>,
    pub email_status: EmailStatus,
    pub is_downloaded: bool,
    /// Anchor values, empty when the data record is missing
    pub data: BTreeMap<String, String>,
}
