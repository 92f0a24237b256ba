use super::dto::SignatureResponseDTO;
use crate::model::signature::Signature;

impl From<Signature> for SignatureResponseDTO {
    fn from(value: Signature) -> Self {
        Self {
            id: value.id,
            certificate_id: value.certificate_id,
            signer_id: value.signer_id,
            created_date: value.created_date,
            last_modified: value.last_modified,
            created_by: value.created_by,
            is_requested: value.is_requested,
            is_signed: value.is_signed,
            last_request_time: value.last_request_time,
            has_image: value.signature_image.is_some_and(|image| !image.is_empty()),
        }
    }
}
