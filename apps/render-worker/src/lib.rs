use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use certifier_core::CertifierCore;
use certifier_core::config::core_config::AppConfig;
use certifier_core::config::{ConfigParsingError, ConfigValidationError};
use certifier_core::repository::error::DataLayerError;
use certifier_core::service::error::ServiceError;
use clap::Subcommand;
use serde::Deserialize;
use shared_types::{CertificateId, SignerId};
use sql_data_provider::{DataLayer, db_conn, document_db_conn};
use thiserror::Error;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerConfig {
    pub database_url: String,
    pub document_database_url: String,
    pub trace_json: Option<bool>,
    pub trace_level: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Imports participants from a JSON array of flat string objects
    AddParticipants {
        certificate_id: CertificateId,
        file: PathBuf,
    },
    /// Stores a signer's signature image
    Sign {
        certificate_id: CertificateId,
        signer_id: SignerId,
        image: PathBuf,
    },
    /// Renders, publishes and archives participant certificates
    Render {
        certificate_id: CertificateId,
        #[arg(long)]
        renew_all: bool,
    },
    /// Renders the design preview
    Thumbnail { certificate_id: CertificateId },
    /// Mails every rendered certificate not delivered yet
    Distribute { certificate_id: CertificateId },
    /// Lists participant documents without an index record
    Orphans {
        certificate_id: CertificateId,
        /// Deletes the listed documents
        #[arg(long)]
        purge: bool,
    },
}

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Config parsing error: `{0}`")]
    ConfigParsing(#[from] ConfigParsingError),
    #[error("Config validation error: `{0}`")]
    ConfigValidation(#[from] ConfigValidationError),
    #[error("Database error: `{0}`")]
    Database(#[from] DataLayerError),
    #[error("Service error: `{0}`")]
    Service(#[from] ServiceError),
    #[error("Failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid participant file `{path}`: {source}")]
    ParticipantFile {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub async fn build_core(config: AppConfig<WorkerConfig>) -> Result<CertifierCore, WorkerError> {
    let db = db_conn(config.app.database_url.as_str()).await?;
    let document_db = document_db_conn(config.app.document_database_url.as_str()).await?;
    let data_layer = DataLayer::build(db, document_db);

    Ok(CertifierCore::new(Arc::new(data_layer), config.core)?)
}

pub async fn run(core: &CertifierCore, command: Command) -> Result<(), WorkerError> {
    match command {
        Command::AddParticipants {
            certificate_id,
            file,
        } => {
            let content = read_file(&file).await?;
            let rows: Vec<BTreeMap<String, String>> = serde_json::from_slice(&content)
                .map_err(|source| WorkerError::ParticipantFile {
                    path: file.to_owned(),
                    source,
                })?;

            let result = core
                .participant_service
                .add_participants(&certificate_id, rows)
                .await?;

            for failed in &result.failed {
                tracing::warn!(%certificate_id, ?failed, "Participant not added");
            }
            tracing::info!(
                %certificate_id,
                created = result.created.len(),
                failed = result.failed.len(),
                "Participants imported"
            );
        }
        Command::Sign {
            certificate_id,
            signer_id,
            image,
        } => {
            let image = read_file(&image).await?;
            core.signature_service
                .sign(&certificate_id, &signer_id, image)
                .await?;
        }
        Command::Render {
            certificate_id,
            renew_all,
        } => {
            let result = core
                .render_service
                .render(&certificate_id, renew_all)
                .await?;

            for participant in &result.results {
                tracing::info!(
                    participant_id = %participant.participant_id,
                    status = ?participant.status,
                    url = participant.certificate_url.as_deref().unwrap_or_default(),
                    error = participant.error.as_deref().unwrap_or_default(),
                    "Participant rendered"
                );
            }
            tracing::info!(
                %certificate_id,
                archive_url = result.archive_url.as_deref().unwrap_or_default(),
                "Render complete"
            );
        }
        Command::Thumbnail { certificate_id } => {
            let url = core
                .render_service
                .render_thumbnail(&certificate_id)
                .await?;
            tracing::info!(%certificate_id, %url, "Thumbnail published");
        }
        Command::Distribute { certificate_id } => {
            let result = core
                .distribution_service
                .distribute_by_mail(&certificate_id)
                .await?;

            for participant in &result.results {
                tracing::info!(
                    participant_id = %participant.participant_id,
                    email_status = %participant.email_status,
                    error = participant.error.as_deref().unwrap_or_default(),
                    "Participant distributed"
                );
            }
        }
        Command::Orphans {
            certificate_id,
            purge,
        } => {
            let orphans = if purge {
                core.participant_service
                    .purge_orphaned_data(&certificate_id)
                    .await?
            } else {
                core.participant_service
                    .find_orphaned_data(&certificate_id)
                    .await?
            };

            for participant_id in &orphans {
                tracing::info!(%certificate_id, %participant_id, purged = purge, "Orphaned participant data");
            }
        }
    }

    Ok(())
}

async fn read_file(path: &Path) -> Result<Vec<u8>, WorkerError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| WorkerError::Io {
            path: path.to_owned(),
            source,
        })
}
