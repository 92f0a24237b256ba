//! sea-orm implementation of the certifier repositories.
//!
//! Certificates, signatures, participants and stored objects live in the index database.
//! Participant documents live in a separate document database, so a write spanning both is
//! never atomic.

use std::sync::Arc;

use certifier_core::repository::DataRepository;
use certifier_core::repository::certificate_repository::CertificateRepository;
use certifier_core::repository::error::DataLayerError;
use certifier_core::repository::object_repository::ObjectRepository;
use certifier_core::repository::participant_data_repository::ParticipantDataRepository;
use certifier_core::repository::participant_repository::ParticipantRepository;
use certifier_core::repository::signature_repository::SignatureRepository;
use migration::{DocumentMigrator, Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, DatabaseConnection};

use crate::certificate::CertificateProvider;
use crate::participant::ParticipantProvider;
use crate::participant_data::ParticipantDataProvider;
use crate::signature::SignatureProvider;
use crate::stored_object::StoredObjectProvider;

mod entity;
mod mapper;

pub mod certificate;
pub mod participant;
pub mod participant_data;
pub mod signature;
pub mod stored_object;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utilities;

#[derive(Clone)]
pub struct DataLayer {
    // Used for tests for now
    #[allow(unused)]
    db: DatabaseConnection,
    #[allow(unused)]
    document_db: DatabaseConnection,
    certificate_repository: Arc<dyn CertificateRepository>,
    signature_repository: Arc<dyn SignatureRepository>,
    participant_repository: Arc<dyn ParticipantRepository>,
    participant_data_repository: Arc<dyn ParticipantDataRepository>,
    object_repository: Arc<dyn ObjectRepository>,
}

impl DataLayer {
    pub fn build(db: DatabaseConnection, document_db: DatabaseConnection) -> Self {
        Self {
            certificate_repository: Arc::new(CertificateProvider { db: db.clone() }),
            signature_repository: Arc::new(SignatureProvider { db: db.clone() }),
            participant_repository: Arc::new(ParticipantProvider { db: db.clone() }),
            participant_data_repository: Arc::new(ParticipantDataProvider {
                db: document_db.clone(),
            }),
            object_repository: Arc::new(StoredObjectProvider { db: db.clone() }),
            db,
            document_db,
        }
    }
}

impl DataRepository for DataLayer {
    fn get_certificate_repository(&self) -> Arc<dyn CertificateRepository> {
        self.certificate_repository.clone()
    }

    fn get_signature_repository(&self) -> Arc<dyn SignatureRepository> {
        self.signature_repository.clone()
    }

    fn get_participant_repository(&self) -> Arc<dyn ParticipantRepository> {
        self.participant_repository.clone()
    }

    fn get_participant_data_repository(&self) -> Arc<dyn ParticipantDataRepository> {
        self.participant_data_repository.clone()
    }

    fn get_object_repository(&self) -> Arc<dyn ObjectRepository> {
        self.object_repository.clone()
    }
}

/// Connects to the index database and applies pending migrations
pub async fn db_conn(
    database_url: impl Into<ConnectOptions>,
) -> Result<DatabaseConnection, DataLayerError> {
    let db = connect(database_url).await?;

    Migrator::up(&db, None)
        .await
        .map_err(|error| DataLayerError::Db(error.into()))?;

    Ok(db)
}

/// Connects to the document database and applies pending migrations
pub async fn document_db_conn(
    database_url: impl Into<ConnectOptions>,
) -> Result<DatabaseConnection, DataLayerError> {
    let db = connect(database_url).await?;

    DocumentMigrator::up(&db, None)
        .await
        .map_err(|error| DataLayerError::Db(error.into()))?;

    Ok(db)
}

async fn connect(
    database_url: impl Into<ConnectOptions>,
) -> Result<DatabaseConnection, DataLayerError> {
    let mut options: ConnectOptions = database_url.into();
    options.sqlx_logging(false);

    sea_orm::Database::connect(options).await.map_err(|error| {
        tracing::error!(%error, "Failed to connect to database");
        DataLayerError::Db(error.into())
    })
}
