use async_trait::async_trait;
use autometrics::autometrics;
use certifier_core::model::participant::{Participant, UpdateParticipantRequest};
use certifier_core::repository::error::DataLayerError;
use certifier_core::repository::participant_repository::ParticipantRepository;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Unchanged};
use shared_types::{CertificateId, ParticipantId};

use super::ParticipantProvider;
use super::mapper::to_update_active_model;
use crate::entity::participant;
use crate::mapper::{to_data_layer_error, to_update_data_layer_error};

#[autometrics]
#[async_trait]
impl ParticipantRepository for ParticipantProvider {
    async fn create(&self, request: Participant) -> Result<ParticipantId, DataLayerError> {
        let id = request.id;

        participant::Entity::insert::<participant::ActiveModel>(request.into())
            .exec(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        Ok(id)
    }

    async fn get(&self, id: &ParticipantId) -> Result<Option<Participant>, DataLayerError> {
        Ok(participant::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(to_data_layer_error)?
            .map(Participant::from))
    }

    async fn get_by_certificate(
        &self,
        certificate_id: &CertificateId,
    ) -> Result<Vec<Participant>, DataLayerError> {
        let participants = participant::Entity::find()
            .filter(participant::Column::CertificateId.eq(certificate_id))
            .order_by_asc(participant::Column::CreatedDate)
            .order_by_asc(participant::Column::Id)
            .all(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        Ok(participants.into_iter().map(Participant::from).collect())
    }

    async fn update(
        &self,
        id: &ParticipantId,
        request: UpdateParticipantRequest,
    ) -> Result<(), DataLayerError> {
        let mut model = to_update_active_model(request);
        model.id = Unchanged(*id);

        model
            .update(&self.db)
            .await
            .map_err(to_update_data_layer_error)?;

        Ok(())
    }

    async fn update_many(
        &self,
        ids: &[ParticipantId],
        request: UpdateParticipantRequest,
    ) -> Result<(), DataLayerError> {
        if ids.is_empty() {
            return Ok(());
        }

        participant::Entity::update_many()
            .set(to_update_active_model(request))
            .filter(participant::Column::Id.is_in(ids))
            .exec(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        Ok(())
    }

    async fn delete(&self, id: &ParticipantId) -> Result<(), DataLayerError> {
        participant::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        Ok(())
    }
}
