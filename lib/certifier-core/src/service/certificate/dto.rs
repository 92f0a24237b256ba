use shared_types::{CertificateId, SignerId};
use time::OffsetDateTime;

use crate::model::certificate::CertificateState;

#[derive(Clone, Debug)]
pub struct CreateCertificateRequestDTO {
    pub name: String,
    pub design: String,
    pub created_by: String,
}

#[derive(Clone, Debug, Default)]
pub struct UpdateCertificateRequestDTO {
    pub name: Option<String>,
    pub design: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CertificateResponseDTO {
    pub id: CertificateId,
    pub created_date: OffsetDateTime,
    pub last_modified: OffsetDateTime,
    pub name: String,
    pub design: String,
    pub created_by: String,
    pub state: CertificateState,
    pub is_signed: bool,
    pub is_distributed: bool,
    pub archive_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub placeholders: Vec<String>,
    pub signers: Vec<SignerId>,
    pub participant_count: usize,
    pub generated_count: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateCertificateResultDTO {
    pub added_signers: Vec<SignerId>,
    pub removed_signers: Vec<SignerId>,
    /// Participant records stripped of fields no longer in the design
    pub pruned_participants: usize,
}
