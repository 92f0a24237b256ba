use super::dto::CertificateResponseDTO;
use crate::model::certificate::{Certificate, CertificateState};
use crate::model::participant::Participant;
use crate::util::anchor::DesignAnchors;

pub(super) fn certificate_response_from_model(
    certificate: Certificate,
    anchors: DesignAnchors,
    participants: &[Participant],
) -> CertificateResponseDTO {
    let state = CertificateState::derive(&certificate, participants);
    let active = participants.iter().filter(|participant| !participant.is_revoked);

    CertificateResponseDTO {
        id: certificate.id,
        created_date: certificate.created_date,
        last_modified: certificate.last_modified,
        name: certificate.name,
        design: certificate.design,
        created_by: certificate.created_by,
        state,
        is_signed: certificate.is_signed,
        is_distributed: certificate.is_distributed,
        archive_url: certificate.archive_url,
        thumbnail_url: certificate.thumbnail_url,
        placeholders: anchors.placeholders,
        signers: anchors.signers,
        participant_count: active.clone().count(),
        generated_count: active
            .filter(|participant| participant.has_certificate_url())
            .count(),
    }
}
