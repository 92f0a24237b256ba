use async_trait::async_trait;
use autometrics::autometrics;
use certifier_core::model::certificate::{Certificate, UpdateCertificateRequest};
use certifier_core::repository::certificate_repository::CertificateRepository;
use certifier_core::repository::error::DataLayerError;
use sea_orm::{ActiveModelTrait, EntityTrait};
use shared_types::CertificateId;

use super::CertificateProvider;
use super::mapper::to_update_active_model;
use crate::entity::certificate;
use crate::mapper::{to_data_layer_error, to_update_data_layer_error};

#[autometrics]
#[async_trait]
impl CertificateRepository for CertificateProvider {
    async fn create(&self, request: Certificate) -> Result<CertificateId, DataLayerError> {
        let id = request.id;

        certificate::Entity::insert::<certificate::ActiveModel>(request.into())
            .exec(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        Ok(id)
    }

    async fn get(&self, id: &CertificateId) -> Result<Option<Certificate>, DataLayerError> {
        Ok(certificate::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(to_data_layer_error)?
            .map(Certificate::from))
    }

    async fn update(
        &self,
        id: &CertificateId,
        request: UpdateCertificateRequest,
    ) -> Result<(), DataLayerError> {
        to_update_active_model(id, request)
            .update(&self.db)
            .await
            .map_err(to_update_data_layer_error)?;

        Ok(())
    }

    async fn delete(&self, id: &CertificateId) -> Result<(), DataLayerError> {
        certificate::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        Ok(())
    }
}
