use std::sync::Arc;

use crate::proto::artifact_publisher::ArtifactPublisher;
use crate::proto::participant_store::ParticipantStore;
use crate::repository::certificate_repository::CertificateRepository;
use crate::repository::signature_repository::SignatureRepository;
use crate::service::signature::SignatureService;

pub mod dto;
pub(crate) mod mapper;
pub mod service;

#[derive(Clone)]
pub struct CertificateService {
    certificate_repository: Arc<dyn CertificateRepository>,
    signature_repository: Arc<dyn SignatureRepository>,
    signature_service: SignatureService,
    participant_store: ParticipantStore,
    artifact_publisher: Arc<ArtifactPublisher>,
}

impl CertificateService {
    pub fn new(
        certificate_repository: Arc<dyn CertificateRepository>,
        signature_repository: Arc<dyn SignatureRepository>,
        signature_service: SignatureService,
        participant_store: ParticipantStore,
        artifact_publisher: Arc<ArtifactPublisher>,
    ) -> Self {
        Self {
            certificate_repository,
            signature_repository,
            signature_service,
            participant_store,
            artifact_publisher,
        }
    }
}
