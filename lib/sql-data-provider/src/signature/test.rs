use certifier_core::model::signature::{Signature, UpdateSignatureRequest};
use certifier_core::repository::error::DataLayerError;
use certifier_core::repository::signature_repository::SignatureRepository;
use sea_orm::{DatabaseConnection, EntityTrait};
use shared_types::{CertificateId, SignerId};
use similar_asserts::assert_eq;

use super::SignatureProvider;
use crate::entity;
use crate::test_utilities::{
    get_dummy_date, insert_certificate, insert_signature, setup_test_data_layer_and_connection,
};

struct TestSetup {
    pub db: DatabaseConnection,
    pub provider: SignatureProvider,
    pub certificate_id: CertificateId,
}

async fn setup() -> TestSetup {
    let data_layer = setup_test_data_layer_and_connection().await;
    let certificate = insert_certificate(&data_layer.db).await;

    TestSetup {
        db: data_layer.db.clone(),
        provider: SignatureProvider { db: data_layer.db },
        certificate_id: certificate.id,
    }
}

fn signer(id: &str) -> SignerId {
    SignerId::try_from(id.to_string()).unwrap()
}

#[tokio::test]
async fn test_create_signature() {
    // given
    let setup = setup().await;
    let signature = Signature::new(setup.certificate_id, signer("dean"), "owner".to_string());

    // when
    let id = setup.provider.create(signature.clone()).await.unwrap();

    // then
    assert_eq!(id, signature.id);
    let stored = entity::signature::Entity::find_by_id(id)
        .one(&setup.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.signer_id, signer("dean"));
    assert!(!stored.is_signed);
}

#[tokio::test]
async fn test_create_duplicate_signer_fails() {
    // given
    let setup = setup().await;
    insert_signature(&setup.db, setup.certificate_id, signer("dean")).await;

    // when
    let result = setup
        .provider
        .create(Signature::new(
            setup.certificate_id,
            signer("dean"),
            "owner".to_string(),
        ))
        .await;

    // then
    assert!(matches!(result, Err(DataLayerError::AlreadyExists)));
}

#[tokio::test]
async fn test_create_signature_unknown_certificate() {
    let setup = setup().await;

    let result = setup
        .provider
        .create(Signature::new(
            CertificateId::new_v4(),
            signer("dean"),
            "owner".to_string(),
        ))
        .await;

    assert!(matches!(result, Err(DataLayerError::IncorrectParameters)));
}

#[tokio::test]
async fn test_get_signatures_by_certificate() {
    // given
    let setup = setup().await;
    let other = insert_certificate(&setup.db).await;
    insert_signature(&setup.db, setup.certificate_id, signer("rector")).await;
    insert_signature(&setup.db, setup.certificate_id, signer("dean")).await;
    insert_signature(&setup.db, other.id, signer("dean")).await;

    // when
    let result = setup
        .provider
        .get_by_certificate(&setup.certificate_id)
        .await
        .unwrap();

    // then
    let signers: Vec<_> = result.iter().map(|s| s.signer_id.to_string()).collect();
    assert_eq!(signers, vec!["dean", "rector"]);
}

#[tokio::test]
async fn test_get_signature_by_signer() {
    // given
    let setup = setup().await;
    let inserted = insert_signature(&setup.db, setup.certificate_id, signer("dean")).await;

    // when
    let found = setup
        .provider
        .get(&setup.certificate_id, &signer("dean"))
        .await
        .unwrap();
    let missing = setup
        .provider
        .get(&setup.certificate_id, &signer("rector"))
        .await
        .unwrap();

    // then
    assert_eq!(found, Some(inserted));
    assert_eq!(missing, None);
}

#[tokio::test]
async fn test_update_signature() {
    // given
    let setup = setup().await;
    let inserted = insert_signature(&setup.db, setup.certificate_id, signer("dean")).await;
    let now = get_dummy_date();

    // when
    setup
        .provider
        .update(
            &inserted.id,
            UpdateSignatureRequest {
                is_requested: Some(true),
                is_signed: Some(true),
                last_request_time: Some(now),
                signature_image: Some(Some(vec![1, 2, 3])),
            },
        )
        .await
        .unwrap();

    // then
    let updated = setup
        .provider
        .get(&setup.certificate_id, &signer("dean"))
        .await
        .unwrap()
        .unwrap();
    assert!(updated.is_requested);
    assert!(updated.is_signed);
    assert_eq!(updated.last_request_time, Some(now));
    assert_eq!(updated.signature_image, Some(vec![1, 2, 3]));
}

#[tokio::test]
async fn test_delete_signature() {
    // given
    let setup = setup().await;
    insert_signature(&setup.db, setup.certificate_id, signer("dean")).await;
    insert_signature(&setup.db, setup.certificate_id, signer("rector")).await;

    // when
    setup
        .provider
        .delete(&setup.certificate_id, &signer("dean"))
        .await
        .unwrap();

    // then
    let remaining = entity::signature::Entity::find()
        .all(&setup.db)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].signer_id, signer("rector"));
}
