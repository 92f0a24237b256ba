use std::io::{Cursor, Write};
use std::sync::Arc;

use ct_codecs::{Base64, Decoder};
use shared_types::CertificateId;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::provider::object_storage::ObjectStorage;
use crate::provider::object_storage::proxy::ProxyUrlResolver;
use crate::provider::pdf::{PdfError, PdfPackager, to_jpeg};
use crate::service::error::{InfrastructureError, ServiceError};
use crate::util::object_path::{ArtifactKind, artifact_path};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub file_name: String,
    /// Proxy URL of the artifact to include
    pub url: String,
}

/// Packages rendered images and stores them, handing out proxy URLs only
pub struct ArtifactPublisher {
    object_storage: Arc<dyn ObjectStorage>,
    proxy: ProxyUrlResolver,
    bucket: String,
    pdf_packager: PdfPackager,
}

impl ArtifactPublisher {
    pub fn new(
        object_storage: Arc<dyn ObjectStorage>,
        proxy: ProxyUrlResolver,
        bucket: String,
        pdf_packager: PdfPackager,
    ) -> Self {
        Self {
            object_storage,
            proxy,
            bucket,
            pdf_packager,
        }
    }

    pub async fn publish_certificate(
        &self,
        certificate_id: &CertificateId,
        image_base64: &str,
    ) -> Result<String, ServiceError> {
        let image = decode_image(image_base64)?;
        let pdf_packager = self.pdf_packager.clone();
        let pdf = run_blocking(move || pdf_packager.package(&image)).await?;

        self.store(certificate_id, ArtifactKind::Certificate, pdf)
            .await
    }

    pub async fn publish_thumbnail(
        &self,
        certificate_id: &CertificateId,
        image_base64: &str,
    ) -> Result<String, ServiceError> {
        let image = decode_image(image_base64)?;
        let jpeg = run_blocking(move || to_jpeg(&image)).await?;

        self.store(certificate_id, ArtifactKind::Thumbnail, jpeg.data)
            .await
    }

    /// Zips the given artifacts. Entries that cannot be fetched or added are skipped; `None` when
    /// nothing could be added.
    pub async fn publish_archive(
        &self,
        certificate_id: &CertificateId,
        entries: Vec<ArchiveEntry>,
    ) -> Result<Option<String>, ServiceError> {
        let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let mut added = 0;

        for entry in entries {
            let content = match self.fetch(&entry.url).await {
                Ok(content) => content,
                Err(error) => {
                    tracing::warn!(url = %entry.url, %error, "Skipping archive entry");
                    continue;
                }
            };

            if let Err(error) = archive.start_file(entry.file_name.as_str(), options) {
                tracing::warn!(file_name = %entry.file_name, %error, "Failed to add archive entry");
                continue;
            }
            if let Err(error) = archive.write_all(&content) {
                tracing::warn!(file_name = %entry.file_name, %error, "Failed to add archive entry");
                // drops the partially written entry
                archive.abort_file()?;
                continue;
            }
            added += 1;
        }

        if added == 0 {
            tracing::info!(%certificate_id, "No artifacts to archive");
            return Ok(None);
        }

        let archive = archive.finish()?.into_inner();
        tracing::debug!(%certificate_id, entries = added, size = archive.len(), "Archive built");

        self.store(certificate_id, ArtifactKind::Archive, archive)
            .await
            .map(Some)
    }

    /// Best effort: failures are logged only
    pub async fn delete_by_url(&self, url: &str) {
        let result = match self.proxy.resolve(url) {
            Ok(location) => {
                self.object_storage
                    .delete(&location.bucket, &location.path)
                    .await
            }
            Err(error) => Err(error),
        };

        if let Err(error) = result {
            tracing::warn!(url, %error, "Failed to delete artifact");
        }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ServiceError> {
        let location = self.proxy.resolve(url)?;
        Ok(self
            .object_storage
            .get(&location.bucket, &location.path)
            .await?)
    }

    async fn store(
        &self,
        certificate_id: &CertificateId,
        kind: ArtifactKind,
        content: Vec<u8>,
    ) -> Result<String, ServiceError> {
        let path = artifact_path(certificate_id, kind);
        self.object_storage
            .put(&self.bucket, &path, content, kind.content_type())
            .await?;

        Ok(self.proxy.to_proxy_url(&self.bucket, &path))
    }
}

/// Image decoding and PDF composition are CPU bound and stay off the async workers
async fn run_blocking<T, Work>(work: Work) -> Result<T, ServiceError>
where
    T: Send + 'static,
    Work: FnOnce() -> Result<T, PdfError> + Send + 'static,
{
    Ok(tokio::task::spawn_blocking(work)
        .await
        .map_err(InfrastructureError::from)??)
}

/// Accepts plain base64 as well as `data:` URLs
fn decode_image(image_base64: &str) -> Result<Vec<u8>, ServiceError> {
    let encoded = match image_base64.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => image_base64,
    };

    Ok(Base64::decode_to_vec(encoded.trim(), None)?)
}
