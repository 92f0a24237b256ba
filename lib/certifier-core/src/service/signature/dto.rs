use shared_types::{CertificateId, SignatureId, SignerId};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureResponseDTO {
    pub id: SignatureId,
    pub certificate_id: CertificateId,
    pub signer_id: SignerId,
    pub created_date: OffsetDateTime,
    pub last_modified: OffsetDateTime,
    pub created_by: String,
    pub is_requested: bool,
    pub is_signed: bool,
    pub last_request_time: Option<OffsetDateTime>,
    pub has_image: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileSignersResultDTO {
    pub added: Vec<SignerId>,
    pub removed: Vec<SignerId>,
    /// Certificate signed flag after reconciliation
    pub is_signed: bool,
}
