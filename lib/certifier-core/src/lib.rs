use std::sync::Arc;

use config::ConfigValidationError;
use config::core_config::CoreConfig;
use proto::artifact_publisher::ArtifactPublisher;
use proto::participant_store::ParticipantStore;
use provider::mail::{MailSender, RelayMailSender};
use provider::notification::{Notifier, WebhookNotifier};
use provider::object_storage::proxy::ProxyUrlResolver;
use provider::object_storage::{ObjectStorage, RepositoryObjectStorage};
use provider::pdf::PdfPackager;
use provider::pdf::signer::{Ed25519PdfSigner, PdfSigner};
use provider::qr_code::{PooledQrCodeGenerator, QrCodeGenerator};
use provider::renderer::Renderer;
use provider::renderer::process::ProcessRenderer;
use repository::DataRepository;
use service::certificate::CertificateService;
use service::distribution::DistributionService;
use service::participant::ParticipantService;
use service::render::RenderService;
use service::signature::SignatureService;

pub mod config;
pub mod model;
pub mod proto;
pub mod provider;
pub mod repository;
pub mod service;
pub mod util;

/// External collaborators of the core, injectable for embedding and tests
pub struct Providers {
    pub renderer: Arc<dyn Renderer>,
    pub qr_code_generator: Arc<dyn QrCodeGenerator>,
    pub object_storage: Arc<dyn ObjectStorage>,
    pub mail_sender: Arc<dyn MailSender>,
    pub notifier: Arc<dyn Notifier>,
    pub pdf_signer: Option<Arc<dyn PdfSigner>>,
}

#[derive(Clone)]
pub struct CertifierCore {
    pub certificate_service: CertificateService,
    pub signature_service: SignatureService,
    pub participant_service: ParticipantService,
    pub render_service: RenderService,
    pub distribution_service: DistributionService,
}

impl CertifierCore {
    /// Wires the default providers: the external renderer process, pooled QR generation,
    /// database-backed object storage and the HTTP mail relay / webhook
    pub fn new(
        data_provider: Arc<dyn DataRepository>,
        config: CoreConfig,
    ) -> Result<Self, ConfigValidationError> {
        let client = reqwest::Client::new();

        let pdf_signer = config
            .pdf
            .signing_key()?
            .map(|key| {
                Ed25519PdfSigner::new(&key)
                    .map(|signer| Arc::new(signer) as Arc<dyn PdfSigner>)
                    .map_err(|error| ConfigValidationError::InvalidKey {
                        key: "pdf.signingKey",
                        reason: error.to_string(),
                    })
            })
            .transpose()?;

        let providers = Providers {
            renderer: Arc::new(ProcessRenderer::new(&config.renderer)),
            qr_code_generator: Arc::new(PooledQrCodeGenerator::new(&config.qr_code)),
            object_storage: Arc::new(RepositoryObjectStorage::new(
                data_provider.get_object_repository(),
            )),
            mail_sender: Arc::new(RelayMailSender::new(client.clone(), &config.mail)),
            notifier: Arc::new(WebhookNotifier::new(
                client,
                config.notification.webhook_url.to_owned(),
            )),
            pdf_signer,
        };

        Self::with_providers(data_provider, config, providers)
    }

    pub fn with_providers(
        data_provider: Arc<dyn DataRepository>,
        config: CoreConfig,
        providers: Providers,
    ) -> Result<Self, ConfigValidationError> {
        let encryption_key = Arc::new(config.signature.encryption_key()?);

        let certificate_repository = data_provider.get_certificate_repository();
        let signature_repository = data_provider.get_signature_repository();
        let participant_store = ParticipantStore::new(
            data_provider.get_participant_repository(),
            data_provider.get_participant_data_repository(),
        );
        let artifact_publisher = Arc::new(ArtifactPublisher::new(
            providers.object_storage,
            ProxyUrlResolver::new(&config.storage.backend_base_url),
            config.storage.bucket.to_owned(),
            PdfPackager::new(providers.pdf_signer),
        ));

        let signature_service = SignatureService::new(
            signature_repository.clone(),
            certificate_repository.clone(),
            providers.notifier,
            encryption_key,
        );

        Ok(Self {
            certificate_service: CertificateService::new(
                certificate_repository.clone(),
                signature_repository,
                signature_service.clone(),
                participant_store.clone(),
                artifact_publisher.clone(),
            ),
            participant_service: ParticipantService::new(
                certificate_repository.clone(),
                participant_store.clone(),
                artifact_publisher.clone(),
            ),
            render_service: RenderService::new(
                certificate_repository.clone(),
                signature_service.clone(),
                participant_store.clone(),
                providers.qr_code_generator,
                providers.renderer,
                artifact_publisher,
                &config.renderer,
            ),
            distribution_service: DistributionService::new(
                certificate_repository,
                participant_store,
                providers.mail_sender,
                &config.distribution,
            ),
            signature_service,
        })
    }
}
