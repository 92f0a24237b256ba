use sea_orm::entity::prelude::*;
use shared_types::{CertificateId, SignatureId, SignerId};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "signature")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: SignatureId,
    pub certificate_id: CertificateId,
    pub signer_id: SignerId,
    pub created_date: OffsetDateTime,
    pub last_modified: OffsetDateTime,
    pub created_by: String,
    pub is_requested: bool,
    pub is_signed: bool,
    pub last_request_time: Option<OffsetDateTime>,
    #[sea_orm(column_type = "Blob")]
    pub signature_image: Option<Vec<u8>>,
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
