use serde::{Deserialize, Serialize};
use shared_types::CertificateId;
use strum::Display;
use time::OffsetDateTime;

use super::participant::Participant;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Certificate {
    pub id: CertificateId,
    pub created_date: OffsetDateTime,
    pub last_modified: OffsetDateTime,
    pub name: String,
    /// Raw design document (JSON)
    pub design: String,
    pub created_by: String,
    pub is_signed: bool,
    pub is_distributed: bool,
    pub archive_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// Lifecycle state of a certificate.
///
/// Only `is_signed` and `is_distributed` are stored, the rest is derived from the participants.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificateState {
    Draft,
    Signed,
    Distributed,
    Generated,
    PartiallyGenerated,
}

impl CertificateState {
    /// A distributed certificate without any non-revoked participant stays `Distributed`,
    /// there is nothing it could be generated for.
    pub fn derive(certificate: &Certificate, participants: &[Participant]) -> Self {
        if !certificate.is_distributed {
            return if certificate.is_signed {
                Self::Signed
            } else {
                Self::Draft
            };
        }

        let mut active = participants.iter().filter(|p| !p.is_revoked).peekable();
        if active.peek().is_none() {
            return Self::Distributed;
        }

        if active.all(Participant::has_certificate_url) {
            Self::Generated
        } else {
            Self::PartiallyGenerated
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UpdateCertificateRequest {
    pub name: Option<String>,
    pub design: Option<String>,
    pub is_signed: Option<bool>,
    pub is_distributed: Option<bool>,
    pub archive_url: Option<Option<String>>,
    pub thumbnail_url: Option<Option<String>>,
}

impl UpdateCertificateRequest {
    pub fn signed(is_signed: bool) -> Self {
        Self {
            is_signed: Some(is_signed),
            ..Default::default()
        }
    }

    pub fn distributed() -> Self {
        Self {
            is_distributed: Some(true),
            ..Default::default()
        }
    }

    pub fn archive_url(url: Option<String>) -> Self {
        Self {
            archive_url: Some(url),
            ..Default::default()
        }
    }

    pub fn thumbnail_url(url: Option<String>) -> Self {
        Self {
            thumbnail_url: Some(url),
            ..Default::default()
        }
    }
}
