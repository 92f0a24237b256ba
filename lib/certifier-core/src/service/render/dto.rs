use shared_types::ParticipantId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderResultStatus {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantRenderResultDTO {
    pub participant_id: ParticipantId,
    pub status: RenderResultStatus,
    pub certificate_url: Option<String>,
    pub error: Option<String>,
}

impl ParticipantRenderResultDTO {
    pub(super) fn success(participant_id: ParticipantId, url: String) -> Self {
        Self {
            participant_id,
            status: RenderResultStatus::Success,
            certificate_url: Some(url),
            error: None,
        }
    }

    pub(super) fn error(participant_id: ParticipantId, error: impl Into<String>) -> Self {
        Self {
            participant_id,
            status: RenderResultStatus::Error,
            certificate_url: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == RenderResultStatus::Success
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderResultDTO {
    /// One entry per selected participant, in selection order
    pub results: Vec<ParticipantRenderResultDTO>,
    pub archive_url: Option<String>,
}
