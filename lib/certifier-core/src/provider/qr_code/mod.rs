use std::collections::HashMap;
use std::io::Cursor;

use async_trait::async_trait;
use ct_codecs::{Base64, Encoder};
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use shared_types::ParticipantId;
use thiserror::Error;

use crate::config::core_config::QrCodeConfig;
use crate::proto::worker_pool;

const ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Error)]
pub enum QrCodeError {
    #[error("QR encoding error: `{0}`")]
    Encode(#[from] qrcode::types::QrError),
    #[error("Image error: `{0}`")]
    Image(#[from] image::ImageError),
    #[error("Base64 encoding error: `{0}`")]
    Base64(#[from] ct_codecs::Error),
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait QrCodeGenerator: Send + Sync {
    /// Base64 encoded PNG verification code per participant.
    ///
    /// Participants whose code could not be produced are missing from the result.
    async fn generate(&self, participants: Vec<ParticipantId>) -> HashMap<ParticipantId, String>;
}

#[derive(Debug)]
struct QrCodeJob {
    participant_id: ParticipantId,
    url: String,
}

pub struct PooledQrCodeGenerator {
    verification_url: String,
    size: u32,
    workers: usize,
}

impl PooledQrCodeGenerator {
    pub fn new(config: &QrCodeConfig) -> Self {
        Self {
            verification_url: config.verification_url.to_owned(),
            size: config.size,
            workers: config.workers.unwrap_or_else(worker_pool::default_workers),
        }
    }

    fn verification_url(&self, participant_id: &ParticipantId) -> String {
        self.verification_url
            .trim()
            .replace(ID_PLACEHOLDER, &participant_id.to_string())
    }
}

#[async_trait]
impl QrCodeGenerator for PooledQrCodeGenerator {
    async fn generate(&self, participants: Vec<ParticipantId>) -> HashMap<ParticipantId, String> {
        let jobs: Vec<QrCodeJob> = participants
            .into_iter()
            .filter_map(|participant_id| {
                let url = self.verification_url(&participant_id);
                if url.is_empty() {
                    tracing::debug!(%participant_id, "Empty verification URL, skipping QR code");
                    return None;
                }
                Some(QrCodeJob {
                    participant_id,
                    url,
                })
            })
            .collect();

        if jobs.is_empty() {
            return HashMap::new();
        }

        let size = self.size;
        let workers = self.workers;
        let job_count = jobs.len();

        let results = tokio::task::spawn_blocking(move || {
            worker_pool::run(jobs, workers, |job| {
                (job.participant_id, encode_png_base64(&job.url, size))
            })
        })
        .await;

        let results = match results {
            Ok(Ok(results)) => results,
            Ok(Err(error)) => {
                tracing::warn!(%error, "Failed to start QR code worker pool");
                return HashMap::new();
            }
            Err(error) => {
                tracing::warn!(%error, "QR code worker pool failed");
                return HashMap::new();
            }
        };

        let codes: HashMap<ParticipantId, String> = results
            .into_iter()
            .filter_map(|(participant_id, result)| match result {
                Ok(code) => Some((participant_id, code)),
                Err(error) => {
                    tracing::warn!(%participant_id, %error, "Failed to generate QR code");
                    None
                }
            })
            .collect();

        tracing::debug!(requested = job_count, generated = codes.len(), "QR codes generated");
        codes
    }
}

pub fn encode_png_base64(content: &str, size: u32) -> Result<String, QrCodeError> {
    let code = QrCode::new(content.as_bytes())?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(size, size)
        .build();

    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(Base64::encode_to_string(&png)?)
}
