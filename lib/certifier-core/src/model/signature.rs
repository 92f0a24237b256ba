use shared_types::{CertificateId, SignatureId, SignerId};
use time::OffsetDateTime;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    pub id: SignatureId,
    pub certificate_id: CertificateId,
    pub signer_id: SignerId,
    pub created_date: OffsetDateTime,
    pub last_modified: OffsetDateTime,
    pub created_by: String,
    pub is_requested: bool,
    pub is_signed: bool,
    pub last_request_time: Option<OffsetDateTime>,
    /// Encrypted signature image, empty until signed
    pub signature_image: Option<Vec<u8>>,
}

impl Signature {
    pub fn new(certificate_id: CertificateId, signer_id: SignerId, created_by: String) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: SignatureId::new_v4(),
            certificate_id,
            signer_id,
            created_date: now,
            last_modified: now,
            created_by,
            is_requested: false,
            is_signed: false,
            last_request_time: None,
            signature_image: None,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UpdateSignatureRequest {
    pub is_requested: Option<bool>,
    pub is_signed: Option<bool>,
    pub last_request_time: Option<OffsetDateTime>,
    pub signature_image: Option<Option<Vec<u8>>>,
}
