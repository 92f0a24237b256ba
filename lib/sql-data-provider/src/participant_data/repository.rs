use std::collections::BTreeMap;

use async_trait::async_trait;
use autometrics::autometrics;
use certifier_core::model::participant::ParticipantData;
use certifier_core::repository::error::DataLayerError;
use certifier_core::repository::participant_data_repository::ParticipantDataRepository;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, Unchanged,
};
use shared_types::{CertificateId, ParticipantId};
use time::OffsetDateTime;

use super::ParticipantDataProvider;
use super::mapper::to_active_model;
use crate::entity::participant_data;
use crate::mapper::{to_data_layer_error, to_update_data_layer_error};

impl ParticipantDataProvider {
    /// Read-modify-write of a single document inside a transaction
    async fn modify(
        &self,
        id: &ParticipantId,
        change: impl FnOnce(&mut BTreeMap<String, String>) + Send,
    ) -> Result<(), DataLayerError> {
        let tx = self.db.begin().await.map_err(to_data_layer_error)?;

        let mut data = get_in_tx(&tx, id)
            .await?
            .ok_or(DataLayerError::RecordNotUpdated)?;
        change(&mut data.values);

        participant_data::ActiveModel {
            id: Unchanged(*id),
            document: Set(serde_json::to_string(&data.to_document())?),
            last_modified: Set(OffsetDateTime::now_utc()),
            ..Default::default()
        }
        .update(&tx)
        .await
        .map_err(to_update_data_layer_error)?;

        tx.commit().await.map_err(to_data_layer_error)
    }
}

async fn get_in_tx(
    tx: &DatabaseTransaction,
    id: &ParticipantId,
) -> Result<Option<ParticipantData>, DataLayerError> {
    participant_data::Entity::find_by_id(id)
        .one(tx)
        .await
        .map_err(to_data_layer_error)?
        .map(ParticipantData::try_from)
        .transpose()
}

#[autometrics]
#[async_trait]
impl ParticipantDataRepository for ParticipantDataProvider {
    async fn create_many(&self, request: Vec<ParticipantData>) -> Result<(), DataLayerError> {
        if request.is_empty() {
            return Ok(());
        }

        let now = OffsetDateTime::now_utc();
        let models = request
            .into_iter()
            .map(|data| to_active_model(data, now))
            .collect::<Result<Vec<_>, _>>()?;

        participant_data::Entity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        Ok(())
    }

    async fn get(&self, id: &ParticipantId) -> Result<Option<ParticipantData>, DataLayerError> {
        participant_data::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(to_data_layer_error)?
            .map(ParticipantData::try_from)
            .transpose()
    }

    async fn get_by_certificate(
        &self,
        certificate_id: &CertificateId,
    ) -> Result<Vec<ParticipantData>, DataLayerError> {
        participant_data::Entity::find()
            .filter(participant_data::Column::CertificateId.eq(certificate_id))
            .order_by_asc(participant_data::Column::Id)
            .all(&self.db)
            .await
            .map_err(to_data_layer_error)?
            .into_iter()
            .map(ParticipantData::try_from)
            .collect()
    }

    async fn set_values(
        &self,
        id: &ParticipantId,
        values: BTreeMap<String, String>,
    ) -> Result<(), DataLayerError> {
        self.modify(id, move |stored| stored.extend(values)).await
    }

    async fn remove_keys(
        &self,
        id: &ParticipantId,
        keys: Vec<String>,
    ) -> Result<(), DataLayerError> {
        if keys.is_empty() {
            return Ok(());
        }

        self.modify(id, move |stored| {
            for key in &keys {
                stored.remove(key);
            }
        })
        .await
    }

    async fn delete(&self, id: &ParticipantId) -> Result<(), DataLayerError> {
        participant_data::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        Ok(())
    }

    async fn delete_many(&self, ids: &[ParticipantId]) -> Result<(), DataLayerError> {
        if ids.is_empty() {
            return Ok(());
        }

        participant_data::Entity::delete_many()
            .filter(participant_data::Column::Id.is_in(ids))
            .exec(&self.db)
            .await
            .map_err(to_data_layer_error)?;

        Ok(())
    }
}
