use certifier_crypto::encryption::EncryptionError;
use shared_types::{CertificateId, ParticipantId, SignerId};
use strum::Display;
use thiserror::Error;

use crate::config::ConfigValidationError;
use crate::provider::mail::MailError;
use crate::provider::object_storage::error::ObjectStorageError;
use crate::provider::pdf::PdfError;
use crate::provider::renderer::error::RendererError;
use crate::repository::error::DataLayerError;
use crate::util::anchor::AnchorError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Mapping error: `{0}`")]
    MappingError(String),

    #[error(transparent)]
    EntityNotFound(#[from] EntityNotFoundError),

    #[error(transparent)]
    BusinessLogic(#[from] BusinessLogicError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    #[error(transparent)]
    Repository(#[from] DataLayerError),

    #[error("Crypto error: `{0}`")]
    Crypto(#[from] EncryptionError),

    #[error("Config validation error: `{0}`")]
    Config(#[from] ConfigValidationError),
}

#[derive(Debug, Error)]
pub enum EntityNotFoundError {
    #[error("Certificate `{0}` not found")]
    Certificate(CertificateId),

    #[error("Participant `{0}` not found")]
    Participant(ParticipantId),

    #[error("Signature of `{signer_id}` on certificate `{certificate_id}` not found")]
    Signature {
        certificate_id: CertificateId,
        signer_id: SignerId,
    },
}

#[derive(Debug, Error)]
pub enum BusinessLogicError {
    #[error("Certificate `{0}` is not signed")]
    CertificateNotSigned(CertificateId),

    #[error("Certificate `{0}` is not distributed")]
    CertificateNotDistributed(CertificateId),

    #[error("Signature of `{0}` was not requested")]
    SignatureNotRequested(SignerId),

    #[error("Participant `{0}` is revoked")]
    ParticipantRevoked(ParticipantId),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Malformed design: {0}")]
    MalformedDesign(String),

    #[error("Participant row {row} is missing anchor field `{field}`")]
    MissingAnchorField { row: usize, field: String },

    #[error("Participant row {row} has unknown field `{field}`")]
    UnknownParticipantField { row: usize, field: String },

    #[error("Invalid participant edit: {0}")]
    InvalidParticipantEdit(String),

    #[error("Participant list is empty")]
    EmptyParticipantList,

    #[error("Invalid signature image: {0}")]
    InvalidSignatureImage(String),

    #[error("Certificate name must not be blank")]
    BlankCertificateName,
}

#[derive(Debug, Error)]
pub enum InfrastructureError {
    #[error("Renderer error: `{0}`")]
    Renderer(#[from] RendererError),

    #[error("Object storage error: `{0}`")]
    ObjectStorage(#[from] ObjectStorageError),

    #[error("Operation `{0}` timed out")]
    Timeout(&'static str),

    #[error("Publishing error: `{0}`")]
    Publish(#[from] PdfError),

    #[error("Archive error: `{0}`")]
    Archive(#[from] zip::result::ZipError),

    #[error("Mail error: `{0}`")]
    Mail(#[from] MailError),

    #[error("Blocking task failed: `{0}`")]
    BlockingTask(#[from] tokio::task::JoinError),
}

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum ErrorCode {
    BR_0000,
    BR_0001,
    BR_0002,
    BR_0003,
    BR_0004,
    BR_0005,
    BR_0006,
    BR_0007,
    BR_0008,
    BR_0009,
    BR_0010,
    BR_0011,
    BR_0012,
    BR_0013,
    BR_0014,
    BR_0015,
    BR_0016,
    BR_0017,
    BR_0018,
    BR_0019,
    BR_0020,
    BR_0021,
    BR_0022,
    BR_0023,
    BR_0024,
}

impl ErrorCode {
    pub const fn msg(&self) -> &'static str {
        match self {
            Self::BR_0000 => "Unspecified error",
            Self::BR_0001 => "Certificate not found",
            Self::BR_0002 => "Participant not found",
            Self::BR_0003 => "Database error",
            Self::BR_0004 => "Mapping error",
            Self::BR_0005 => "Malformed design",
            Self::BR_0006 => "Missing anchor field",
            Self::BR_0007 => "Unknown participant field",
            Self::BR_0008 => "Invalid participant edit",
            Self::BR_0009 => "Empty participant list",
            Self::BR_0010 => "Invalid signature image",
            Self::BR_0011 => "Certificate not signed",
            Self::BR_0012 => "Certificate not distributed",
            Self::BR_0013 => "Signature not requested",
            Self::BR_0014 => "Participant revoked",
            Self::BR_0015 => "Signature not found",
            Self::BR_0016 => "Renderer error",
            Self::BR_0017 => "Object storage error",
            Self::BR_0018 => "Operation timed out",
            Self::BR_0019 => "Artifact publishing error",
            Self::BR_0020 => "Crypto error",
            Self::BR_0021 => "Mail error",
            Self::BR_0022 => "Configuration error",
            Self::BR_0023 => "Blank certificate name",
            Self::BR_0024 => "Blocking task failed",
        }
    }
}

impl ServiceError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::EntityNotFound(error) => error.error_code(),
            Self::BusinessLogic(error) => error.error_code(),
            Self::Validation(error) => error.error_code(),
            Self::Infrastructure(error) => error.error_code(),
            Self::Repository(error) => error.error_code(),
            Self::MappingError(_) => ErrorCode::BR_0004,
            Self::Crypto(_) => ErrorCode::BR_0020,
            Self::Config(_) => ErrorCode::BR_0022,
        }
    }
}

impl EntityNotFoundError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Certificate(_) => ErrorCode::BR_0001,
            Self::Participant(_) => ErrorCode::BR_0002,
            Self::Signature { .. } => ErrorCode::BR_0015,
        }
    }
}

impl BusinessLogicError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::CertificateNotSigned(_) => ErrorCode::BR_0011,
            Self::CertificateNotDistributed(_) => ErrorCode::BR_0012,
            Self::SignatureNotRequested(_) => ErrorCode::BR_0013,
            Self::ParticipantRevoked(_) => ErrorCode::BR_0014,
        }
    }
}

impl ValidationError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::MalformedDesign(_) => ErrorCode::BR_0005,
            Self::MissingAnchorField { .. } => ErrorCode::BR_0006,
            Self::UnknownParticipantField { .. } => ErrorCode::BR_0007,
            Self::InvalidParticipantEdit(_) => ErrorCode::BR_0008,
            Self::EmptyParticipantList => ErrorCode::BR_0009,
            Self::InvalidSignatureImage(_) => ErrorCode::BR_0010,
            Self::BlankCertificateName => ErrorCode::BR_0023,
        }
    }
}

impl InfrastructureError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Renderer(_) => ErrorCode::BR_0016,
            Self::ObjectStorage(_) => ErrorCode::BR_0017,
            Self::Timeout(_) => ErrorCode::BR_0018,
            Self::Publish(_) | Self::Archive(_) => ErrorCode::BR_0019,
            Self::Mail(_) => ErrorCode::BR_0021,
            Self::BlockingTask(_) => ErrorCode::BR_0024,
        }
    }
}

impl From<AnchorError> for ValidationError {
    fn from(value: AnchorError) -> Self {
        match value {
            AnchorError::MalformedDesign(reason) => Self::MalformedDesign(reason),
        }
    }
}

impl From<AnchorError> for ServiceError {
    fn from(value: AnchorError) -> Self {
        Self::Validation(value.into())
    }
}

impl From<RendererError> for ServiceError {
    fn from(value: RendererError) -> Self {
        Self::Infrastructure(value.into())
    }
}

impl From<ObjectStorageError> for ServiceError {
    fn from(value: ObjectStorageError) -> Self {
        Self::Infrastructure(value.into())
    }
}

impl From<PdfError> for ServiceError {
    fn from(value: PdfError) -> Self {
        Self::Infrastructure(value.into())
    }
}

impl From<zip::result::ZipError> for ServiceError {
    fn from(value: zip::result::ZipError) -> Self {
        Self::Infrastructure(value.into())
    }
}

impl From<ct_codecs::Error> for ServiceError {
    fn from(value: ct_codecs::Error) -> Self {
        Self::MappingError(value.to_string())
    }
}

impl From<uuid::Error> for ServiceError {
    fn from(value: uuid::Error) -> Self {
        Self::MappingError(value.to_string())
    }
}
