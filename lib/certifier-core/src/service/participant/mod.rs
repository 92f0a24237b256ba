use std::sync::Arc;

use crate::proto::artifact_publisher::ArtifactPublisher;
use crate::proto::participant_store::ParticipantStore;
use crate::repository::certificate_repository::CertificateRepository;

pub mod dto;
pub(crate) mod mapper;
pub mod service;

#[derive(Clone)]
pub struct ParticipantService {
    certificate_repository: Arc<dyn CertificateRepository>,
    participant_store: ParticipantStore,
    artifact_publisher: Arc<ArtifactPublisher>,
}

impl ParticipantService {
    pub fn new(
        certificate_repository: Arc<dyn CertificateRepository>,
        participant_store: ParticipantStore,
        artifact_publisher: Arc<ArtifactPublisher>,
    ) -> Self {
        Self {
            certificate_repository,
            participant_store,
            artifact_publisher,
        }
    }
}

#[cfg(test)]
mod test;
