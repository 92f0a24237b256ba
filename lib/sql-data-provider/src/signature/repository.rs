use async_trait::async_trait;
use autometrics::autometrics;
use certifier_core::model::signature::{Signature, UpdateSignatureRequest};
use certifier_core::repository::error::DataLayerError;
use certifier_core::repository::signature_repository::SignatureRepository;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use shared_types::{CertificateId, SignatureId, SignerId};

use super::SignatureProvider;
use super::mapper::to_update_active_model;
use crate::entity::signature;
use crate::mapper::{to_data_layer_error, to_update_data_layer_error};

#[autometrics]
#[async_trait]
impl SignatureRepository for SignatureProvider {
    async fn create(&self, request: Signature) -> Result<SignatureId, DataLayerError> {
        let id = request.id;

        signature::Entity::insert::<signature::ActiveModel>(request.into())
            .exec(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        Ok(id)
    }

    async fn get_by_certificate(
        &self,
        certificate_id: &CertificateId,
    ) -> Result<Vec<Signature>, DataLayerError> {
        let signatures = signature::Entity::find()
            .filter(signature::Column::CertificateId.eq(certificate_id))
            .order_by_asc(signature::Column::CreatedDate)
            .order_by_asc(signature::Column::SignerId)
            .all(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        Ok(signatures.into_iter().map(Signature::from).collect())
    }

    async fn get(
        &self,
        certificate_id: &CertificateId,
        signer_id: &SignerId,
    ) -> Result<Option<Signature>, DataLayerError> {
        Ok(signature::Entity::find()
            .filter(signature::Column::CertificateId.eq(certificate_id))
            .filter(signature::Column::SignerId.eq(signer_id))
            .one(&self.db)
            .await
            .map_err(to_data_layer_error)?
            .map(Signature::from))
    }

    async fn update(
        &self,
        id: &SignatureId,
        request: UpdateSignatureRequest,
    ) -> Result<(), DataLayerError> {
        to_update_active_model(id, request)
            .update(&self.db)
            .await
            .map_err(to_update_data_layer_error)?;

        Ok(())
    }

    async fn delete(
        &self,
        certificate_id: &CertificateId,
        signer_id: &SignerId,
    ) -> Result<(), DataLayerError> {
        signature::Entity::delete_many()
            .filter(signature::Column::CertificateId.eq(certificate_id))
            .filter(signature::Column::SignerId.eq(signer_id))
            .exec(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        Ok(())
    }
}
