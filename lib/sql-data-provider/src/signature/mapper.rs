use certifier_core::model::signature::{Signature, UpdateSignatureRequest};
use sea_orm::{Set, Unchanged};
use shared_types::SignatureId;
use time::OffsetDateTime;

use crate::entity::signature;

impl From<signature::Model> for Signature {
    fn from(value: signature::Model) -> Self {
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
            signature_image: value.signature_image,
        }
    }
}

impl From<Signature> for signature::ActiveModel {
    fn from(value: Signature) -> Self {
        Self {
            id: Set(value.id),
            certificate_id: Set(value.certificate_id),
            signer_id: Set(value.signer_id),
            created_date: Set(value.created_date),
            last_modified: Set(value.last_modified),
            created_by: Set(value.created_by),
            is_requested: Set(value.is_requested),
            is_signed: Set(value.is_signed),
            last_request_time: Set(value.last_request_time),
            signature_image: Set(value.signature_image),
        }
    }
}

pub(super) fn to_update_active_model(
    id: &SignatureId,
    request: UpdateSignatureRequest,
) -> signature::ActiveModel {
    signature::ActiveModel {
        id: Unchanged(*id),
        last_modified: Set(OffsetDateTime::now_utc()),
        is_requested: request.is_requested.map(Set).unwrap_or_default(),
        is_signed: request.is_signed.map(Set).unwrap_or_default(),
        last_request_time: request
            .last_request_time
            .map(|time| Set(Some(time)))
            .unwrap_or_default(),
        signature_image: request.signature_image.map(Set).unwrap_or_default(),
        ..Default::default()
    }
}
