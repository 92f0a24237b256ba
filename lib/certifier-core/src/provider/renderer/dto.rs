use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared_types::CertificateId;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderCertificateDTO {
    pub id: CertificateId,
    pub name: String,
    pub design: String,
    /// Signer id to base64 encoded signature image
    pub signatures: HashMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderBatchRequestDTO {
    pub certificate: RenderCertificateDTO,
    /// Flat participant documents: `_id`, `certificate_id` and anchor values
    pub participants: Vec<Map<String, Value>>,
    /// Participant id to base64 encoded QR code
    pub qr_codes: HashMap<String, String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderMode {
    #[default]
    Thumbnail,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderThumbnailRequestDTO {
    pub certificate: RenderCertificateDTO,
    pub mode: RenderMode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderStatus {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedParticipantDTO {
    /// Kept raw, ids are matched against the request by the caller
    pub participant_id: String,
    #[serde(default)]
    pub image_base64: Option<String>,
    pub status: RenderStatus,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedThumbnailDTO {
    #[serde(default)]
    pub image_base64: Option<String>,
    pub status: RenderStatus,
    #[serde(default)]
    pub error: Option<String>,
}
