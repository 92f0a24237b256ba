use std::sync::Arc;
use std::time::Duration;

use crate::config::core_config::RendererConfig;
use crate::proto::artifact_publisher::ArtifactPublisher;
use crate::proto::participant_store::ParticipantStore;
use crate::provider::qr_code::QrCodeGenerator;
use crate::provider::renderer::Renderer;
use crate::repository::certificate_repository::CertificateRepository;
use crate::service::signature::SignatureService;

pub mod dto;
pub mod service;

#[derive(Clone)]
pub struct RenderService {
    certificate_repository: Arc<dyn CertificateRepository>,
    signature_service: SignatureService,
    participant_store: ParticipantStore,
    qr_code_generator: Arc<dyn QrCodeGenerator>,
    renderer: Arc<dyn Renderer>,
    artifact_publisher: Arc<ArtifactPublisher>,
    batch_timeout: Duration,
    thumbnail_timeout: Duration,
}

impl RenderService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        certificate_repository: Arc<dyn CertificateRepository>,
        signature_service: SignatureService,
        participant_store: ParticipantStore,
        qr_code_generator: Arc<dyn QrCodeGenerator>,
        renderer: Arc<dyn Renderer>,
        artifact_publisher: Arc<ArtifactPublisher>,
        config: &RendererConfig,
    ) -> Self {
        Self {
            certificate_repository,
            signature_service,
            participant_store,
            qr_code_generator,
            renderer,
            artifact_publisher,
            batch_timeout: config.batch_timeout,
            thumbnail_timeout: config.thumbnail_timeout,
        }
    }
}
