use certifier_core::model::certificate::{Certificate, UpdateCertificateRequest};
use sea_orm::{Set, Unchanged};
use shared_types::CertificateId;
use time::OffsetDateTime;

use crate::entity::certificate;

impl From<certificate::Model> for Certificate {
    fn from(value: certificate::Model) -> Self {
        Self {
            id: value.id,
            created_date: value.created_date,
            last_modified: value.last_modified,
            name: value.name,
            design: value.design,
            created_by: value.created_by,
            is_signed: value.is_signed,
            is_distributed: value.is_distributed,
            archive_url: value.archive_url,
            thumbnail_url: value.thumbnail_url,
        }
    }
}

impl From<Certificate> for certificate::ActiveModel {
    fn from(value: Certificate) -> Self {
        Self {
            id: Set(value.id),
            created_date: Set(value.created_date),
            last_modified: Set(value.last_modified),
            name: Set(value.name),
            design: Set(value.design),
            created_by: Set(value.created_by),
            is_signed: Set(value.is_signed),
            is_distributed: Set(value.is_distributed),
            archive_url: Set(value.archive_url),
            thumbnail_url: Set(value.thumbnail_url),
        }
    }
}

pub(super) fn to_update_active_model(
    id: &CertificateId,
    request: UpdateCertificateRequest,
) -> certificate::ActiveModel {
    certificate::ActiveModel {
        id: Unchanged(*id),
        last_modified: Set(OffsetDateTime::now_utc()),
        name: request.name.map(Set).unwrap_or_default(),
        design: request.design.map(Set).unwrap_or_default(),
        is_signed: request.is_signed.map(Set).unwrap_or_default(),
        is_distributed: request.is_distributed.map(Set).unwrap_or_default(),
        archive_url: request.archive_url.map(Set).unwrap_or_default(),
        thumbnail_url: request.thumbnail_url.map(Set).unwrap_or_default(),
        ..Default::default()
    }
}
