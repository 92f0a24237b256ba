use std::collections::BTreeMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use certifier_core::config::core_config::{AppConfig, NoCustomConfig};
use certifier_core::model::certificate::CertificateState;
use certifier_core::model::participant::EmailStatus;
use certifier_core::provider::mail::{MailError, MailSender};
use certifier_core::provider::notification::WebhookNotifier;
use certifier_core::provider::object_storage::RepositoryObjectStorage;
use certifier_core::provider::qr_code::PooledQrCodeGenerator;
use certifier_core::provider::renderer::Renderer;
use certifier_core::provider::renderer::dto::{
    RenderBatchRequestDTO, RenderStatus, RenderThumbnailRequestDTO, RenderedParticipantDTO,
    RenderedThumbnailDTO,
};
use certifier_core::provider::renderer::error::RendererError;
use certifier_core::repository::DataRepository;
use certifier_core::service::certificate::dto::CreateCertificateRequestDTO;
use certifier_core::service::error::{BusinessLogicError, ServiceError};
use certifier_core::service::render::dto::RenderResultStatus;
use certifier_core::{CertifierCore, Providers};
use ct_codecs::{Base64, Encoder};
use image::{ImageFormat, Rgb, RgbImage};
use render_worker::{Command, run};
use shared_types::SignerId;
use sql_data_provider::test_utilities::setup_test_data_layer_and_connection;

const CONFIG: &str = r#"
core:
  renderer:
    command: unused
  storage:
    bucket: certificates
    backendBaseUrl: https://api.example.com
  qrCode:
    verificationUrl: https://verify.example.com/{id}
    workers: 2
  signature:
    encryptionKey: "0707070707070707070707070707070707070707070707070707070707070707"
  mail:
    relayUrl: https://mail.example.com/send
"#;

const DESIGN: &str = r#"{"objects":[
    {"id":"PLACEHOLDER-NAME","type":"textbox"},
    {"id":"SIGNATURE-dean","type":"image"},
    {"id":"qr-anchor","type":"image"}
]}"#;

fn png() -> Vec<u8> {
    let image = RgbImage::from_pixel(6, 4, Rgb([200, 30, 30]));
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .unwrap();
    png
}

/// Renders every participant that received a QR code, the rest fail
struct QrCheckingRenderer;

#[async_trait]
impl Renderer for QrCheckingRenderer {
    async fn render_batch(
        &self,
        request: RenderBatchRequestDTO,
    ) -> Result<Vec<RenderedParticipantDTO>, RendererError> {
        assert!(request.certificate.signatures.contains_key("dean"));

        Ok(request
            .participants
            .iter()
            .map(|document| {
                let participant_id = document["_id"].as_str().unwrap().to_string();
                if request.qr_codes.contains_key(&participant_id) {
                    RenderedParticipantDTO {
                        participant_id,
                        image_base64: Some(Base64::encode_to_string(png()).unwrap()),
                        status: RenderStatus::Success,
                        error: None,
                    }
                } else {
                    RenderedParticipantDTO {
                        participant_id,
                        image_base64: None,
                        status: RenderStatus::Error,
                        error: Some("qr code missing".to_string()),
                    }
                }
            })
            .collect())
    }

    async fn render_thumbnail(
        &self,
        _request: RenderThumbnailRequestDTO,
    ) -> Result<RenderedThumbnailDTO, RendererError> {
        Ok(RenderedThumbnailDTO {
            image_base64: Some(Base64::encode_to_string(png()).unwrap()),
            status: RenderStatus::Success,
            error: None,
        })
    }
}

#[derive(Default)]
struct RecordingMailSender {
    sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl MailSender for RecordingMailSender {
    async fn send(&self, address: &str, attachment_url: &str) -> Result<(), MailError> {
        self.sent
            .lock()
            .unwrap()
            .push((address.to_owned(), attachment_url.to_owned()));
        Ok(())
    }
}

async fn setup() -> (CertifierCore, Arc<RecordingMailSender>) {
    let data_layer = setup_test_data_layer_and_connection().await;
    let config = AppConfig::<NoCustomConfig>::from_yaml([CONFIG]).unwrap().core;
    let mail_sender = Arc::new(RecordingMailSender::default());

    let providers = Providers {
        renderer: Arc::new(QrCheckingRenderer),
        qr_code_generator: Arc::new(PooledQrCodeGenerator::new(&config.qr_code)),
        object_storage: Arc::new(RepositoryObjectStorage::new(
            data_layer.get_object_repository(),
        )),
        mail_sender: mail_sender.clone(),
        notifier: Arc::new(WebhookNotifier::new(reqwest::Client::new(), None)),
        pdf_signer: None,
    };

    let core = CertifierCore::with_providers(Arc::new(data_layer), config, providers).unwrap();
    (core, mail_sender)
}

fn row(name: &str, email: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("NAME".to_string(), name.to_string()),
        ("email".to_string(), email.to_string()),
    ])
}

#[tokio::test]
async fn test_certificate_pipeline() {
    let (core, mail_sender) = setup().await;

    let certificate_id = core
        .certificate_service
        .create_certificate(CreateCertificateRequestDTO {
            name: "Rust course".to_string(),
            design: DESIGN.to_string(),
            created_by: "owner@example.com".to_string(),
        })
        .await
        .unwrap();

    let added = core
        .participant_service
        .add_participants(
            &certificate_id,
            vec![row("Ann", "ann@example.com"), row("Bob", "bob@example.com")],
        )
        .await
        .unwrap();
    assert_eq!(added.created.len(), 2);
    assert!(added.failed.is_empty());

    let unsigned = core.render_service.render(&certificate_id, false).await;
    assert!(matches!(
        unsigned,
        Err(ServiceError::BusinessLogic(
            BusinessLogicError::CertificateNotSigned(_)
        ))
    ));

    let dean: SignerId = "dean".parse().unwrap();
    core.signature_service
        .sign(&certificate_id, &dean, png())
        .await
        .unwrap();
    let certificate = core
        .certificate_service
        .get_certificate(&certificate_id)
        .await
        .unwrap();
    assert_eq!(certificate.state, CertificateState::Signed);

    let rendered = core
        .render_service
        .render(&certificate_id, false)
        .await
        .unwrap();
    assert_eq!(rendered.results.len(), 2);
    for result in &rendered.results {
        assert_eq!(result.status, RenderResultStatus::Success);
        assert!(
            result
                .certificate_url
                .as_deref()
                .unwrap()
                .starts_with("https://api.example.com/files/download/certificates/")
        );
    }
    assert!(rendered.archive_url.is_some());

    let again = core
        .render_service
        .render(&certificate_id, false)
        .await
        .unwrap();
    assert!(again.results.is_empty());
    assert_eq!(again.archive_url, rendered.archive_url);

    let distributed = core
        .distribution_service
        .distribute_by_mail(&certificate_id)
        .await
        .unwrap();
    assert_eq!(distributed.results.len(), 2);
    assert!(
        distributed
            .results
            .iter()
            .all(|result| result.email_status == EmailStatus::Success)
    );
    let mut recipients: Vec<String> = mail_sender
        .sent
        .lock()
        .unwrap()
        .iter()
        .map(|(address, _)| address.to_owned())
        .collect();
    recipients.sort();
    assert_eq!(recipients, vec!["ann@example.com", "bob@example.com"]);

    let certificate = core
        .certificate_service
        .get_certificate(&certificate_id)
        .await
        .unwrap();
    assert_eq!(certificate.state, CertificateState::Generated);
    assert_eq!(certificate.generated_count, 2);

    // an edited anchor value gets the participant rendered again
    let edited = rendered.results[0].participant_id;
    core.participant_service
        .edit_participant(
            &edited,
            BTreeMap::from([("NAME".to_string(), "Anna".to_string())]),
        )
        .await
        .unwrap();
    let participant = core
        .participant_service
        .get_participant(&edited)
        .await
        .unwrap();
    assert_eq!(participant.certificate_url, None);
    assert_eq!(participant.email_status, EmailStatus::Pending);

    let rerendered = core
        .render_service
        .render(&certificate_id, false)
        .await
        .unwrap();
    assert_eq!(rerendered.results.len(), 1);
    assert_eq!(rerendered.results[0].participant_id, edited);
    assert_eq!(rerendered.results[0].status, RenderResultStatus::Success);
    assert!(rerendered.results[0].certificate_url.is_some());
}

#[tokio::test]
async fn test_worker_commands() {
    let (core, _) = setup().await;
    let directory = tempfile::tempdir().unwrap();

    let certificate_id = core
        .certificate_service
        .create_certificate(CreateCertificateRequestDTO {
            name: "Rust course".to_string(),
            design: DESIGN.to_string(),
            created_by: "owner@example.com".to_string(),
        })
        .await
        .unwrap();

    let participants = directory.path().join("participants.json");
    std::fs::write(
        &participants,
        r#"[{"NAME":"Ann","email":"ann@example.com"}]"#,
    )
    .unwrap();
    let signature = directory.path().join("dean.png");
    std::fs::write(&signature, png()).unwrap();

    run(
        &core,
        Command::AddParticipants {
            certificate_id,
            file: participants,
        },
    )
    .await
    .unwrap();
    run(
        &core,
        Command::Sign {
            certificate_id,
            signer_id: "dean".parse().unwrap(),
            image: signature,
        },
    )
    .await
    .unwrap();
    run(
        &core,
        Command::Render {
            certificate_id,
            renew_all: false,
        },
    )
    .await
    .unwrap();
    run(&core, Command::Thumbnail { certificate_id })
        .await
        .unwrap();

    let certificate = core
        .certificate_service
        .get_certificate(&certificate_id)
        .await
        .unwrap();
    assert_eq!(certificate.generated_count, 1);
    assert!(certificate.thumbnail_url.is_some());

    let missing = run(
        &core,
        Command::AddParticipants {
            certificate_id,
            file: directory.path().join("missing.json"),
        },
    )
    .await;
    assert!(matches!(missing, Err(render_worker::WorkerError::Io { .. })));
}
