use sea_orm::entity::prelude::*;
use shared_types::{CertificateId, ParticipantId};
use time::OffsetDateTime;

/// Participant document, lives in the document database
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "participant_data")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: ParticipantId,
    pub certificate_id: CertificateId,
    /// Flat JSON object of string values
    #[sea_orm(column_type = "Text")]
    pub document: String,
    pub created_date: OffsetDateTime,
    pub last_modified: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
