use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

use async_trait::async_trait;
use ct_codecs::{Base64, Encoder};
use image::{ImageFormat, Rgb, RgbImage};
use indoc::indoc;
use shared_types::{CertificateId, ParticipantId, SignerId};
use time::OffsetDateTime;

use crate::config::core_config::{AppConfig, NoCustomConfig};
use crate::model::certificate::Certificate;
use crate::model::participant::{EmailStatus, Participant, ParticipantData};
use crate::model::signature::Signature;
use crate::provider::object_storage::ObjectStorage;
use crate::provider::object_storage::error::ObjectStorageError;

pub const TEST_DESIGN: &str = r#"{"objects":[
    {"id":"PLACEHOLDER-name","type":"textbox"},
    {"id":"PLACEHOLDER-email","type":"textbox"},
    {"id":"SIGNATURE-dean","type":"image"},
    {"id":"verify-qr-anchor","type":"rect"}
]}"#;

pub fn generic_config() -> AppConfig<NoCustomConfig> {
    let config = indoc! {"
        core:
            renderer:
                command: renderer
                batchTimeout: 10
                thumbnailTimeout: 2
            storage:
                bucket: certificates
                backendBaseUrl: https://api.example.com
            qrCode:
                verificationUrl: https://verify.example.com/{id}
                size: 32
            signature:
                encryptionKey: '0101010101010101010101010101010101010101010101010101010101010101'
            distribution:
                concurrency: 2
            mail:
                relayUrl: https://mail.example.com/send
    "};

    AppConfig::from_yaml([config]).unwrap()
}

pub fn png_base64(width: u32, height: u32) -> String {
    let image = RgbImage::from_pixel(width, height, Rgb([10, 120, 200]));
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .unwrap();
    Base64::encode_to_string(&png).unwrap()
}

pub fn dummy_certificate() -> Certificate {
    let now = OffsetDateTime::now_utc();
    Certificate {
        id: CertificateId::new_v4(),
        created_date: now,
        last_modified: now,
        name: "Rust course".to_string(),
        design: TEST_DESIGN.to_string(),
        created_by: "owner@example.com".to_string(),
        is_signed: true,
        is_distributed: false,
        archive_url: None,
        thumbnail_url: None,
    }
}

pub fn dummy_participant(certificate_id: CertificateId) -> Participant {
    let now = OffsetDateTime::now_utc();
    let id = ParticipantId::new_v4();
    Participant {
        id,
        certificate_id,
        created_date: now,
        last_modified: now,
        is_revoked: false,
        certificate_url: None,
        email_status: EmailStatus::Pending,
        is_downloaded: false,
        data: Some(ParticipantData {
            id,
            certificate_id,
            values: [
                ("name".to_string(), format!("Participant {id}")),
                ("email".to_string(), format!("{id}@example.com")),
            ]
            .into(),
        }),
    }
}

pub fn dummy_signature(certificate_id: CertificateId, signer_id: &str) -> Signature {
    let signer_id: SignerId = signer_id.parse().unwrap();
    Signature::new(certificate_id, signer_id, "owner@example.com".to_string())
}

/// Object storage keeping everything in a map, keyed by `(bucket, path)`
#[derive(Default)]
pub struct InMemoryObjectStorage {
    pub objects: Mutex<HashMap<(String, String), Vec<u8>>>,
}

impl InMemoryObjectStorage {
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .objects
            .lock()
            .unwrap()
            .keys()
            .map(|(_, path)| path.to_owned())
            .collect();
        paths.sort();
        paths
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn put(
        &self,
        bucket: &str,
        path: &str,
        content: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), ObjectStorageError> {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_owned(), path.to_owned()), content);
        Ok(())
    }

    async fn get(&self, bucket: &str, path: &str) -> Result<Vec<u8>, ObjectStorageError> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_owned(), path.to_owned()))
            .cloned()
            .ok_or_else(|| ObjectStorageError::NotFound {
                bucket: bucket.to_owned(),
                path: path.to_owned(),
            })
    }

    async fn delete(&self, bucket: &str, path: &str) -> Result<(), ObjectStorageError> {
        self.objects
            .lock()
            .unwrap()
            .remove(&(bucket.to_owned(), path.to_owned()));
        Ok(())
    }

    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, ObjectStorageError> {
        Ok(self
            .objects
            .lock()
            .unwrap()
            .keys()
            .filter(|(object_bucket, path)| object_bucket == bucket && path.starts_with(prefix))
            .map(|(_, path)| path.to_owned())
            .collect())
    }
}
