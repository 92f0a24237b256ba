//! Anchor discovery in certificate designs.
//!
//! A design is a JSON document with a top-level `objects` array. Objects are anchors purely by
//! their `id`:
//! - `PLACEHOLDER-<name>`: participant text field
//! - `SIGNATURE-<signerId>`: required signer
//! - any id containing `qr-anchor`: verification QR slot
//!
//! Objects of type `group` are searched recursively.

use serde_json::Value;
use shared_types::SignerId;
use thiserror::Error;

use crate::model::participant::{DOCUMENT_CERTIFICATE_ID_KEY, DOCUMENT_ID_KEY};

pub const PLACEHOLDER_PREFIX: &str = "PLACEHOLDER-";
pub const SIGNATURE_PREFIX: &str = "SIGNATURE-";
pub const QR_ANCHOR_MARKER: &str = "qr-anchor";

const OBJECTS_KEY: &str = "objects";
const GROUP_TYPE: &str = "group";

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DesignAnchors {
    /// Placeholder names in order of first appearance
    pub placeholders: Vec<String>,
    /// Signer ids in order of first appearance
    pub signers: Vec<SignerId>,
    pub has_qr_anchor: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnchorError {
    #[error("Malformed design: {0}")]
    MalformedDesign(String),
}

pub fn extract_anchors(design: &str) -> Result<DesignAnchors, AnchorError> {
    let root: Value = serde_json::from_str(design)
        .map_err(|err| AnchorError::MalformedDesign(err.to_string()))?;

    let root = root
        .as_object()
        .ok_or_else(|| AnchorError::MalformedDesign("root is not an object".to_string()))?;

    let objects = root
        .get(OBJECTS_KEY)
        .ok_or_else(|| AnchorError::MalformedDesign("missing `objects`".to_string()))?
        .as_array()
        .ok_or_else(|| AnchorError::MalformedDesign("`objects` is not an array".to_string()))?;

    let mut anchors = DesignAnchors::default();
    collect(objects, &mut anchors)?;
    Ok(anchors)
}

fn collect(objects: &[Value], anchors: &mut DesignAnchors) -> Result<(), AnchorError> {
    for object in objects {
        let Some(object) = object.as_object() else {
            continue;
        };

        if let Some(id) = object.get("id").and_then(Value::as_str) {
            visit_id(id, anchors)?;
        }

        let is_group = object.get("type").and_then(Value::as_str) == Some(GROUP_TYPE);
        if is_group {
            if let Some(children) = object.get(OBJECTS_KEY).and_then(Value::as_array) {
                collect(children, anchors)?;
            }
        }
    }
    Ok(())
}

fn visit_id(id: &str, anchors: &mut DesignAnchors) -> Result<(), AnchorError> {
    if let Some(name) = id.strip_prefix(PLACEHOLDER_PREFIX) {
        // participant documents own these keys
        if name == DOCUMENT_ID_KEY || name == DOCUMENT_CERTIFICATE_ID_KEY {
            return Err(AnchorError::MalformedDesign(format!(
                "placeholder `{name}` uses a reserved name"
            )));
        }
        if !name.is_empty() && !anchors.placeholders.iter().any(|known| known == name) {
            anchors.placeholders.push(name.to_owned());
        }
    } else if let Some(signer) = id.strip_prefix(SIGNATURE_PREFIX) {
        // blank suffixes are not valid signer ids
        if let Ok(signer) = signer.parse::<SignerId>() {
            if !anchors.signers.contains(&signer) {
                anchors.signers.push(signer);
            }
        }
    }

    if id.contains(QR_ANCHOR_MARKER) {
        anchors.has_qr_anchor = true;
    }
    Ok(())
}
