use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared_types::{CertificateId, ParticipantId};
use strum::{Display, EnumString};
use time::OffsetDateTime;

/// Key of the shared identifier inside a participant document
pub const DOCUMENT_ID_KEY: &str = "_id";
pub const DOCUMENT_CERTIFICATE_ID_KEY: &str = "certificate_id";
pub const DOCUMENT_EMAIL_KEY: &str = "email";

pub const RESERVED_DOCUMENT_KEYS: [&str; 3] =
    [DOCUMENT_ID_KEY, DOCUMENT_CERTIFICATE_ID_KEY, DOCUMENT_EMAIL_KEY];

pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_DOCUMENT_KEYS.contains(&key)
}

/// Index record of a participant, the per-anchor data lives in [`ParticipantData`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Participant {
    pub id: ParticipantId,
    pub certificate_id: CertificateId,
    pub created_date: OffsetDateTime,
    pub last_modified: OffsetDateTime,
    pub is_revoked: bool,
    pub certificate_url: Option<String>,
    pub email_status: EmailStatus,
    pub is_downloaded: bool,

    // Relations:
    pub data: Option<ParticipantData>,
}

impl Participant {
    pub fn has_certificate_url(&self) -> bool {
        self.certificate_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

#[derive(
    Clone, Copy, Debug, Default, Display, EnumString, Eq, PartialEq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EmailStatus {
    #[default]
    Pending,
    Success,
    Failed,
    Downloaded,
}

/// Document-store record of a participant, keyed by the same id as the index record
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParticipantData {
    pub id: ParticipantId,
    pub certificate_id: CertificateId,
    /// Anchor values plus the optional `email` key
    pub values: BTreeMap<String, String>,
}

impl ParticipantData {
    pub fn email(&self) -> Option<&str> {
        self.values
            .get(DOCUMENT_EMAIL_KEY)
            .map(|email| email.trim())
            .filter(|email| !email.is_empty())
    }

    /// Keys that are neither reserved nor part of the given anchor set
    pub fn unknown_keys<'a>(&'a self, anchors: &[String]) -> Vec<&'a str> {
        self.values
            .keys()
            .filter(|key| !is_reserved_key(key) && !anchors.contains(key))
            .map(String::as_str)
            .collect()
    }

    /// Flat document representation, reserved keys included
    pub fn to_document(&self) -> Map<String, Value> {
        let mut document: Map<String, Value> = self
            .values
            .iter()
            .map(|(key, value)| (key.to_owned(), Value::String(value.to_owned())))
            .collect();
        document.insert(
            DOCUMENT_ID_KEY.to_owned(),
            Value::String(self.id.to_string()),
        );
        document.insert(
            DOCUMENT_CERTIFICATE_ID_KEY.to_owned(),
            Value::String(self.certificate_id.to_string()),
        );
        document
    }

    /// Inverse of [`Self::to_document`]; non-string values are stored as their JSON text
    pub fn from_document(
        id: ParticipantId,
        certificate_id: CertificateId,
        document: Map<String, Value>,
    ) -> Self {
        let values = document
            .into_iter()
            .filter(|(key, _)| key != DOCUMENT_ID_KEY && key != DOCUMENT_CERTIFICATE_ID_KEY)
            .map(|(key, value)| {
                let value = match value {
                    Value::String(value) => value,
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect();

        Self {
            id,
            certificate_id,
            values,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UpdateParticipantRequest {
    pub is_revoked: Option<bool>,
    pub certificate_url: Option<Option<String>>,
    pub email_status: Option<EmailStatus>,
    pub is_downloaded: Option<bool>,
}

impl UpdateParticipantRequest {
    /// Status reset applied before a participant is rendered again
    pub fn reset_status() -> Self {
        Self {
            email_status: Some(EmailStatus::Pending),
            is_downloaded: Some(false),
            ..Default::default()
        }
    }
}
