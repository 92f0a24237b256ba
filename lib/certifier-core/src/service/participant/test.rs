use std::collections::BTreeMap;
use std::sync::Arc;

use shared_types::{CertificateId, ParticipantId};
use url::Url;

use super::ParticipantService;
use crate::model::participant::ParticipantData;
use crate::proto::artifact_publisher::ArtifactPublisher;
use crate::proto::participant_store::ParticipantStore;
use crate::provider::object_storage::ObjectStorage;
use crate::provider::object_storage::proxy::ProxyUrlResolver;
use crate::provider::pdf::PdfPackager;
use crate::repository::certificate_repository::MockCertificateRepository;
use crate::repository::error::DataLayerError;
use crate::repository::participant_data_repository::MockParticipantDataRepository;
use crate::repository::participant_repository::MockParticipantRepository;
use crate::service::error::{EntityNotFoundError, ServiceError, ValidationError};
use crate::service::test_utilities::{
    InMemoryObjectStorage, dummy_certificate, dummy_participant,
};

#[derive(Default)]
struct Repositories {
    certificate_repository: MockCertificateRepository,
    participant_repository: MockParticipantRepository,
    participant_data_repository: MockParticipantDataRepository,
    object_storage: Arc<InMemoryObjectStorage>,
}

fn setup_service(repositories: Repositories) -> ParticipantService {
    let base: Url = "https://api.example.com".parse().unwrap();
    ParticipantService::new(
        Arc::new(repositories.certificate_repository),
        ParticipantStore::new(
            Arc::new(repositories.participant_repository),
            Arc::new(repositories.participant_data_repository),
        ),
        Arc::new(ArtifactPublisher::new(
            repositories.object_storage,
            ProxyUrlResolver::new(&base),
            "certificates".to_string(),
            PdfPackager::new(None),
        )),
    )
}

fn row(name: &str, email: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("name".to_string(), name.to_string()),
        ("email".to_string(), email.to_string()),
    ])
}

#[tokio::test]
async fn test_add_participants_uses_design_anchors() {
    let certificate = dummy_certificate();
    let certificate_id = certificate.id;

    let mut repositories = Repositories::default();
    repositories
        .certificate_repository
        .expect_get()
        .returning(move |_| Ok(Some(certificate.clone())));
    repositories
        .participant_data_repository
        .expect_create_many()
        .once()
        .withf(|data: &Vec<ParticipantData>| {
            data.len() == 2 && data.iter().all(|data| data.values.contains_key("name"))
        })
        .returning(|_| Ok(()));
    repositories
        .participant_repository
        .expect_create()
        .times(2)
        .returning(|participant| Ok(participant.id));

    let result = setup_service(repositories)
        .add_participants(
            &certificate_id,
            vec![row("Ada", "ada@example.com"), row("Linus", "linus@example.com")],
        )
        .await
        .unwrap();

    assert_eq!(result.created.len(), 2);
    assert!(result.failed.is_empty());
}

#[tokio::test]
async fn test_add_participants_rejects_unknown_field() {
    let certificate = dummy_certificate();
    let certificate_id = certificate.id;

    let mut repositories = Repositories::default();
    repositories
        .certificate_repository
        .expect_get()
        .returning(move |_| Ok(Some(certificate.clone())));
    repositories
        .participant_data_repository
        .expect_create_many()
        .never();

    let mut extra = row("Ada", "ada@example.com");
    extra.insert("grade".to_string(), "A".to_string());
    let result = setup_service(repositories)
        .add_participants(&certificate_id, vec![row("Linus", "l@example.com"), extra])
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::Validation(ValidationError::UnknownParticipantField { row: 1, field })) if field == "grade"
    ));
}

#[tokio::test]
async fn test_add_participants_unknown_certificate() {
    let mut repositories = Repositories::default();
    repositories
        .certificate_repository
        .expect_get()
        .returning(|_| Ok(None));

    let result = setup_service(repositories)
        .add_participants(&CertificateId::new_v4(), vec![row("Ada", "a@example.com")])
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::EntityNotFound(EntityNotFoundError::Certificate(_)))
    ));
}

#[tokio::test]
async fn test_get_participants_joins_data() {
    let certificate = dummy_certificate();
    let certificate_id = certificate.id;
    let participant = dummy_participant(certificate_id);
    let data = participant.data.clone().unwrap();
    let mut index = participant.clone();
    index.data = None;

    let mut repositories = Repositories::default();
    repositories
        .certificate_repository
        .expect_get()
        .returning(move |_| Ok(Some(certificate.clone())));
    repositories
        .participant_repository
        .expect_get_by_certificate()
        .returning(move |_| Ok(vec![index.clone()]));
    repositories
        .participant_data_repository
        .expect_get_by_certificate()
        .returning(move |_| Ok(vec![data.clone()]));

    let result = setup_service(repositories)
        .get_participants(&certificate_id)
        .await
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, participant.id);
    assert_eq!(result[0].data, participant.data.unwrap().values);
}

#[tokio::test]
async fn test_get_participant_not_found() {
    let mut repositories = Repositories::default();
    repositories
        .participant_repository
        .expect_get()
        .returning(|_| Ok(None));

    let id = ParticipantId::new_v4();
    let result = setup_service(repositories).get_participant(&id).await;

    assert!(matches!(
        result,
        Err(ServiceError::EntityNotFound(EntityNotFoundError::Participant(missing))) if missing == id
    ));
}

#[tokio::test]
async fn test_edit_participant_writes_anchor_values() {
    let certificate = dummy_certificate();
    let participant = dummy_participant(certificate.id);
    let participant_id = participant.id;

    let mut repositories = Repositories::default();
    repositories
        .certificate_repository
        .expect_get()
        .returning(move |_| Ok(Some(certificate.clone())));
    repositories.participant_repository.expect_get().returning({
        let participant = participant.clone();
        move |_| Ok(Some(participant.clone()))
    });
    repositories
        .participant_repository
        .expect_update()
        .once()
        .returning(|_, _| Ok(()));
    repositories
        .participant_data_repository
        .expect_get()
        .returning(move |_| Ok(participant.data.clone()));
    repositories
        .participant_data_repository
        .expect_set_values()
        .once()
        .withf(move |id, values| {
            *id == participant_id && values.get("name").map(String::as_str) == Some("Grace")
        })
        .returning(|_, _| Ok(()));

    setup_service(repositories)
        .edit_participant(
            &participant_id,
            BTreeMap::from([("name".to_string(), "Grace".to_string())]),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_edit_participant_rejects_non_anchor() {
    let certificate = dummy_certificate();
    let participant = dummy_participant(certificate.id);
    let participant_id = participant.id;

    let mut repositories = Repositories::default();
    repositories
        .certificate_repository
        .expect_get()
        .returning(move |_| Ok(Some(certificate.clone())));
    repositories
        .participant_repository
        .expect_get()
        .returning(move |_| Ok(Some(participant.clone())));
    repositories
        .participant_data_repository
        .expect_get()
        .returning(|_| Ok(None));
    repositories
        .participant_data_repository
        .expect_set_values()
        .never();

    let result = setup_service(repositories)
        .edit_participant(
            &participant_id,
            BTreeMap::from([("grade".to_string(), "A".to_string())]),
        )
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::Validation(ValidationError::InvalidParticipantEdit(_)))
    ));
}

#[tokio::test]
async fn test_edit_participant_deletes_superseded_artifact() {
    let object_storage = Arc::new(InMemoryObjectStorage::default());
    object_storage
        .put("certificates", "c/p.pdf", vec![1, 2], "application/pdf")
        .await
        .unwrap();

    let certificate = dummy_certificate();
    let mut participant = dummy_participant(certificate.id);
    participant.certificate_url =
        Some("https://api.example.com/files/download/certificates/c/p.pdf".to_string());
    let participant_id = participant.id;

    let mut repositories = Repositories {
        object_storage: object_storage.clone(),
        ..Default::default()
    };
    repositories
        .certificate_repository
        .expect_get()
        .returning(move |_| Ok(Some(certificate.clone())));
    repositories.participant_repository.expect_get().returning({
        let participant = participant.clone();
        move |_| Ok(Some(participant.clone()))
    });
    repositories
        .participant_data_repository
        .expect_get()
        .returning(move |_| Ok(participant.data.clone()));
    repositories
        .participant_data_repository
        .expect_set_values()
        .once()
        .returning(|_, _| Ok(()));
    repositories
        .participant_repository
        .expect_update()
        .once()
        .withf(|_, request| request.certificate_url == Some(None))
        .returning(|_, _| Ok(()));

    setup_service(repositories)
        .edit_participant(
            &participant_id,
            BTreeMap::from([("name".to_string(), "Grace".to_string())]),
        )
        .await
        .unwrap();

    assert!(object_storage.paths().is_empty());
}

#[tokio::test]
async fn test_revoke_participant() {
    let participant = dummy_participant(CertificateId::new_v4());
    let participant_id = participant.id;

    let mut repositories = Repositories::default();
    repositories
        .participant_repository
        .expect_get()
        .returning(move |_| Ok(Some(participant.clone())));
    repositories
        .participant_data_repository
        .expect_get()
        .returning(|_| Ok(None));
    repositories
        .participant_repository
        .expect_update()
        .once()
        .withf(move |id, request| *id == participant_id && request.is_revoked == Some(true))
        .returning(|_, _| Ok(()));

    setup_service(repositories)
        .revoke_participant(&participant_id)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_participant_removes_artifact() {
    let object_storage = Arc::new(InMemoryObjectStorage::default());
    object_storage
        .put("certificates", "c/p.pdf", vec![1, 2], "application/pdf")
        .await
        .unwrap();

    let mut participant = dummy_participant(CertificateId::new_v4());
    participant.certificate_url =
        Some("https://api.example.com/files/download/certificates/c/p.pdf".to_string());
    let participant_id = participant.id;

    let mut repositories = Repositories {
        object_storage: object_storage.clone(),
        ..Default::default()
    };
    repositories
        .participant_repository
        .expect_get()
        .returning(move |_| Ok(Some(participant.clone())));
    repositories
        .participant_data_repository
        .expect_get()
        .returning(|_| Ok(None));
    repositories
        .participant_repository
        .expect_delete()
        .once()
        .returning(|_| Ok(()));
    repositories
        .participant_data_repository
        .expect_delete()
        .once()
        .returning(|_| Err(DataLayerError::RecordNotUpdated));

    setup_service(repositories)
        .delete_participant(&participant_id)
        .await
        .unwrap();

    assert!(object_storage.paths().is_empty());
}
