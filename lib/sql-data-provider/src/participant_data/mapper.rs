use certifier_core::model::participant::ParticipantData;
use certifier_core::repository::error::DataLayerError;
use sea_orm::Set;
use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::entity::participant_data;

impl TryFrom<participant_data::Model> for ParticipantData {
    type Error = DataLayerError;

    fn try_from(value: participant_data::Model) -> Result<Self, Self::Error> {
        let document: Map<String, Value> = serde_json::from_str(&value.document)?;
        Ok(Self::from_document(value.id, value.certificate_id, document))
    }
}

pub(super) fn to_active_model(
    data: ParticipantData,
    now: OffsetDateTime,
) -> Result<participant_data::ActiveModel, DataLayerError> {
    Ok(participant_data::ActiveModel {
        id: Set(data.id),
        certificate_id: Set(data.certificate_id),
        document: Set(serde_json::to_string(&data.to_document())?),
        created_date: Set(now),
        last_modified: Set(now),
    })
}
