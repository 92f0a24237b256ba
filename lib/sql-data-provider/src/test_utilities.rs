use certifier_core::model::certificate::Certificate;
use certifier_core::model::participant::{EmailStatus, Participant};
use certifier_core::model::signature::Signature;
use sea_orm::{ActiveModelTrait, DatabaseConnection};
use shared_types::{CertificateId, ParticipantId, SignatureId, SignerId};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::entity::{certificate, participant, signature};
use crate::{DataLayer, db_conn, document_db_conn};

pub fn get_dummy_date() -> OffsetDateTime {
    datetime!(2005-04-02 21:37 +1)
}

pub fn dummy_certificate() -> Certificate {
    Certificate {
        id: CertificateId::new_v4(),
        created_date: get_dummy_date(),
        last_modified: get_dummy_date(),
        name: "Rust course".to_string(),
        design: r#"{"pages":[{"objects":[{"type":"text","text":"{{NAME}}"}]}]}"#.to_string(),
        created_by: "owner".to_string(),
        is_signed: false,
        is_distributed: false,
        archive_url: None,
        thumbnail_url: None,
    }
}

pub async fn insert_certificate(db: &DatabaseConnection) -> Certificate {
    let certificate = dummy_certificate();

    certificate::ActiveModel::from(certificate.clone())
        .insert(db)
        .await
        .unwrap();

    certificate
}

pub async fn insert_signature(
    db: &DatabaseConnection,
    certificate_id: CertificateId,
    signer_id: SignerId,
) -> Signature {
    let signature = Signature {
        id: SignatureId::new_v4(),
        certificate_id,
        signer_id,
        created_date: get_dummy_date(),
        last_modified: get_dummy_date(),
        created_by: "owner".to_string(),
        is_requested: false,
        is_signed: false,
        last_request_time: None,
        signature_image: None,
    };

    signature::ActiveModel::from(signature.clone())
        .insert(db)
        .await
        .unwrap();

    signature
}

pub async fn insert_participant(
    db: &DatabaseConnection,
    certificate_id: CertificateId,
) -> Participant {
    let participant = Participant {
        id: ParticipantId::new_v4(),
        certificate_id,
        created_date: get_dummy_date(),
        last_modified: get_dummy_date(),
        is_revoked: false,
        certificate_url: None,
        email_status: EmailStatus::Pending,
        is_downloaded: false,
        data: None,
    };

    participant::ActiveModel::from(participant.clone())
        .insert(db)
        .await
        .unwrap();

    participant
}

pub async fn setup_test_data_layer_and_connection_with_custom_url(
    database_url: &str,
    document_database_url: &str,
) -> DataLayer {
    let db = db_conn(database_url).await.unwrap();
    let document_db = document_db_conn(document_database_url).await.unwrap();
    DataLayer::build(db, document_db)
}

pub async fn setup_test_data_layer_and_connection() -> DataLayer {
    setup_test_data_layer_and_connection_with_custom_url("sqlite::memory:", "sqlite::memory:").await
}
