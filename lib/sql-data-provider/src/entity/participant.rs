use certifier_core::model::participant::EmailStatus as ModelEmailStatus;
use sea_orm::entity::prelude::*;
use shared_types::{CertificateId, ParticipantId};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "participant")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: ParticipantId,
    pub certificate_id: CertificateId,
    pub created_date: OffsetDateTime,
    pub last_modified: OffsetDateTime,
    pub is_revoked: bool,
    pub certificate_url: Option<String>,
    pub email_status: EmailStatus,
    pub is_downloaded: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::certificate::Entity",
        from = "Column::CertificateId",
        to = "super::certificate::Column::Id",
        on_update = "Restrict",
        on_delete = "Cascade"
    )]
    Certificate,
}

impl Related<super::certificate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Certificate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum EmailStatus {
    #[default]
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "SUCCESS")]
    Success,
    #[sea_orm(string_value = "FAILED")]
    Failed,
    #[sea_orm(string_value = "DOWNLOADED")]
    Downloaded,
}

impl From<ModelEmailStatus> for EmailStatus {
    fn from(value: ModelEmailStatus) -> Self {
        match value {
            ModelEmailStatus::Pending => Self::Pending,
            ModelEmailStatus::Success => Self::Success,
            ModelEmailStatus::Failed => Self::Failed,
            ModelEmailStatus::Downloaded => Self::Downloaded,
        }
    }
}

impl From<EmailStatus> for ModelEmailStatus {
    fn from(value: EmailStatus) -> Self {
        match value {
            EmailStatus::Pending => Self::Pending,
            EmailStatus::Success => Self::Success,
            EmailStatus::Failed => Self::Failed,
            EmailStatus::Downloaded => Self::Downloaded,
        }
    }
}
