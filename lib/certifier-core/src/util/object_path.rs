use shared_types::CertificateId;
use strum::Display;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ArtifactKind {
    #[strum(serialize = "thumbnail")]
    Thumbnail,
    #[strum(serialize = "certificate")]
    Certificate,
    #[strum(serialize = "certificates")]
    Archive,
}

impl ArtifactKind {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Thumbnail => "jpg",
            Self::Certificate => "pdf",
            Self::Archive => "zip",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Thumbnail => "image/jpeg",
            Self::Certificate => "application/pdf",
            Self::Archive => "application/zip",
        }
    }
}

/// `{certificateId}/{kind}_{unixMillis}_{uuid}.{ext}`
pub fn artifact_path(certificate_id: &CertificateId, kind: ArtifactKind) -> String {
    let timestamp = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!(
        "{certificate_id}/{kind}_{timestamp}_{}.{}",
        Uuid::new_v4(),
        kind.extension()
    )
}
