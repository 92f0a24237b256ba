use async_trait::async_trait;
use shared_types::{CertificateId, SignatureId, SignerId};

use crate::model::signature::{Signature, UpdateSignatureRequest};
use crate::repository::error::DataLayerError;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait SignatureRepository: Send + Sync {
    /// Fails with [`DataLayerError::AlreadyExists`] for a duplicate (certificate, signer) pair
    async fn create(&self, request: Signature) -> Result<SignatureId, DataLayerError>;

    async fn get_by_certificate(
        &self,
        certificate_id: &CertificateId,
    ) -> Result<Vec<Signature>, DataLayerError>;

    async fn get(
        &self,
        certificate_id: &CertificateId,
        signer_id: &SignerId,
    ) -> Result<Option<Signature>, DataLayerError>;

    async fn update(
        &self,
        id: &SignatureId,
        request: UpdateSignatureRequest,
    ) -> Result<(), DataLayerError>;

    async fn delete(
        &self,
        certificate_id: &CertificateId,
        signer_id: &SignerId,
    ) -> Result<(), DataLayerError>;
}
