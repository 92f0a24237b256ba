use shared_types::ParticipantId;

use crate::model::participant::EmailStatus;
pub use crate::proto::participant_store::FailedParticipant;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantDistributionResultDTO {
    pub participant_id: ParticipantId,
    /// `SUCCESS` or `FAILED`
    pub email_status: EmailStatus,
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistributionResultDTO {
    /// Participants already delivered are skipped and not listed
    pub results: Vec<ParticipantDistributionResultDTO>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BulkUpdateResultDTO {
    pub updated: Vec<ParticipantId>,
    pub failed: Vec<FailedParticipant>,
}
