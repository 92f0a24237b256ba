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
                    .table(StoredObject::Table)
                    .if_not_exists()
                    .col(uuid_char(StoredObject::Id).primary_key())
                    .col(timestamp(StoredObject::CreatedDate, manager))
                    .col(ColumnDef::new(StoredObject::Bucket).string().not_null())
                    .col(ColumnDef::new(StoredObject::Path).string().not_null())
                    .col(
                        ColumnDef::new(StoredObject::ContentType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StoredObject::Content)
                            .large_blob(manager)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("index-stored_object-bucket-path")
                    .table(StoredObject::Table)
                    .col(StoredObject::Bucket)
                    .col(StoredObject::Path)
                    .unique()
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum StoredObject {
    Table,
    Id,
    CreatedDate,
    Bucket,
    Path,
    ContentType,
    Content,
}
