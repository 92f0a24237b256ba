use sea_orm_migration::prelude::*;

use crate::datatype::{ColumnDefExt, timestamp, uuid_char};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParticipantData::Table)
                    .if_not_exists()
                    .col(uuid_char(ParticipantData::Id).primary_key())
                    .col(uuid_char(ParticipantData::CertificateId))
                    .col(
                        ColumnDef::new(ParticipantData::Document)
                            .large_text(manager)
                            .not_null(),
                    )
                    .col(timestamp(ParticipantData::CreatedDate, manager))
                    .col(timestamp(ParticipantData::LastModified, manager))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("index-participant_data-certificate_id")
                    .table(ParticipantData::Table)
                    .col(ParticipantData::CertificateId)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum ParticipantData {
    Table,
    Id,
    CertificateId,
    Document,
    CreatedDate,
    LastModified,
}
