use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use shared_types::{CertificateId, ParticipantId};

use super::DistributionService;
use crate::config::core_config::DistributionConfig;
use crate::model::participant::{EmailStatus, Participant, ParticipantData};
use crate::proto::participant_store::ParticipantStore;
use crate::provider::mail::{MailError, MockMailSender};
use crate::repository::certificate_repository::MockCertificateRepository;
use crate::repository::error::DataLayerError;
use crate::repository::participant_data_repository::MockParticipantDataRepository;
use crate::repository::participant_repository::MockParticipantRepository;
use crate::service::error::{BusinessLogicError, ServiceError};
use crate::service::test_utilities::{dummy_certificate, dummy_participant};

#[derive(Default)]
struct Repositories {
    certificate_repository: MockCertificateRepository,
    participant_repository: MockParticipantRepository,
    participant_data_repository: MockParticipantDataRepository,
    mail_sender: MockMailSender,
}

fn setup_service(repositories: Repositories) -> DistributionService {
    DistributionService::new(
        Arc::new(repositories.certificate_repository),
        ParticipantStore::new(
            Arc::new(repositories.participant_repository),
            Arc::new(repositories.participant_data_repository),
        ),
        Arc::new(repositories.mail_sender),
        &DistributionConfig { concurrency: 2 },
    )
}

fn rendered(certificate_id: CertificateId) -> Participant {
    let mut participant = dummy_participant(certificate_id);
    participant.certificate_url = Some(format!(
        "https://api.example.com/files/download/certificates/{}.pdf",
        participant.id
    ));
    participant
}

fn with_participants(repositories: &mut Repositories, participants: Vec<Participant>) {
    let data: Vec<ParticipantData> = participants
        .iter()
        .filter_map(|participant| participant.data.clone())
        .collect();
    repositories
        .participant_repository
        .expect_get_by_certificate()
        .returning(move |_| Ok(participants.clone()));
    repositories
        .participant_data_repository
        .expect_get_by_certificate()
        .returning(move |_| Ok(data.clone()));
}

fn reqwest_error() -> MailError {
    let error = reqwest::Client::new()
        .get("not a url")
        .build()
        .unwrap_err();
    MailError::Relay(error)
}

#[tokio::test]
async fn test_distribute_by_mail() {
    let mut certificate = dummy_certificate();
    certificate.is_distributed = true;
    let certificate_id = certificate.id;

    let deliverable = rendered(certificate_id);
    let mut delivered = rendered(certificate_id);
    delivered.email_status = EmailStatus::Success;
    let mut revoked = rendered(certificate_id);
    revoked.is_revoked = true;
    let not_rendered = dummy_participant(certificate_id);
    let mut invalid_email = rendered(certificate_id);
    if let Some(data) = invalid_email.data.as_mut() {
        data.values
            .insert("email".to_string(), "not-an-email".to_string());
    }

    let deliverable_id = deliverable.id;
    let deliverable_email = format!("{deliverable_id}@example.com");
    let failed_ids = HashSet::from([not_rendered.id, invalid_email.id]);

    let mut repositories = Repositories::default();
    repositories
        .certificate_repository
        .expect_get()
        .returning(move |_| Ok(Some(certificate.clone())));
    with_participants(
        &mut repositories,
        vec![deliverable, delivered, revoked, not_rendered, invalid_email],
    );
    repositories
        .mail_sender
        .expect_send()
        .once()
        .withf(move |address, url| address == deliverable_email && url.ends_with(".pdf"))
        .returning(|_, _| Ok(()));

    let statuses: Arc<Mutex<Vec<(ParticipantId, EmailStatus)>>> = Arc::default();
    repositories.participant_repository.expect_update().returning({
        let statuses = statuses.clone();
        move |id, request| {
            statuses
                .lock()
                .unwrap()
                .push((*id, request.email_status.unwrap()));
            Ok(())
        }
    });

    let result = setup_service(repositories)
        .distribute_by_mail(&certificate_id)
        .await
        .unwrap();

    assert_eq!(result.results.len(), 3);
    for entry in &result.results {
        if entry.participant_id == deliverable_id {
            assert_eq!(entry.email_status, EmailStatus::Success);
            assert!(entry.error.is_none());
        } else {
            assert!(failed_ids.contains(&entry.participant_id));
            assert_eq!(entry.email_status, EmailStatus::Failed);
            assert!(entry.error.is_some());
        }
    }

    let statuses = statuses.lock().unwrap();
    assert_eq!(statuses.len(), 3);
    assert!(statuses.contains(&(deliverable_id, EmailStatus::Success)));
}

#[tokio::test]
async fn test_distribute_by_mail_relay_failure() {
    let mut certificate = dummy_certificate();
    certificate.is_distributed = true;
    let certificate_id = certificate.id;
    let participant = rendered(certificate_id);
    let participant_id = participant.id;

    let mut repositories = Repositories::default();
    repositories
        .certificate_repository
        .expect_get()
        .returning(move |_| Ok(Some(certificate.clone())));
    with_participants(&mut repositories, vec![participant]);
    repositories
        .mail_sender
        .expect_send()
        .once()
        .returning(|_, _| Err(reqwest_error()));
    repositories
        .participant_repository
        .expect_update()
        .once()
        .withf(move |id, request| {
            *id == participant_id && request.email_status == Some(EmailStatus::Failed)
        })
        .returning(|_, _| Ok(()));

    let result = setup_service(repositories)
        .distribute_by_mail(&certificate_id)
        .await
        .unwrap();

    assert_eq!(result.results.len(), 1);
    assert_eq!(result.results[0].email_status, EmailStatus::Failed);
}

#[tokio::test]
async fn test_distribute_by_mail_requires_distributed() {
    let certificate = dummy_certificate();
    let certificate_id = certificate.id;

    let mut repositories = Repositories::default();
    repositories
        .certificate_repository
        .expect_get()
        .returning(move |_| Ok(Some(certificate.clone())));
    repositories.mail_sender.expect_send().never();

    let result = setup_service(repositories)
        .distribute_by_mail(&certificate_id)
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::BusinessLogic(
            BusinessLogicError::CertificateNotDistributed(_)
        ))
    ));
}

#[tokio::test]
async fn test_mark_distributed_collects_failures() {
    let ids: Vec<ParticipantId> = (0..5).map(|_| ParticipantId::new_v4()).collect();
    let broken = ids[3];

    let mut repositories = Repositories::default();
    repositories
        .participant_repository
        .expect_update()
        .times(5)
        .withf(|_, request| request.email_status == Some(EmailStatus::Success))
        .returning(move |id, _| {
            if *id == broken {
                Err(DataLayerError::RecordNotUpdated)
            } else {
                Ok(())
            }
        });

    let result = setup_service(repositories)
        .mark_distributed(ids.to_owned())
        .await;

    assert_eq!(result.updated.len(), 4);
    assert!(!result.updated.contains(&broken));
    assert_eq!(result.failed.len(), 1);
    assert_eq!(result.failed[0].id, broken);
}

#[tokio::test]
async fn test_mark_downloaded() {
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
        .withf(|_, request| {
            request.is_downloaded == Some(true)
                && request.email_status == Some(EmailStatus::Downloaded)
        })
        .returning(|_, _| Ok(()));

    setup_service(repositories)
        .mark_downloaded(&participant_id)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_mark_downloaded_revoked() {
    let mut participant = dummy_participant(CertificateId::new_v4());
    participant.is_revoked = true;
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
    repositories.participant_repository.expect_update().never();

    let result = setup_service(repositories)
        .mark_downloaded(&participant_id)
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::BusinessLogic(BusinessLogicError::ParticipantRevoked(_)))
    ));
}
