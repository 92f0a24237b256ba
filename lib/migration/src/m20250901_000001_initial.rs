use sea_orm_migration::prelude::*;

use crate::datatype::{ColumnDefExt, timestamp, timestamp_null, uuid_char};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Certificate::Table)
                    .if_not_exists()
                    .col(uuid_char(Certificate::Id).primary_key())
                    .col(timestamp(Certificate::CreatedDate, manager))
                    .col(timestamp(Certificate::LastModified, manager))
                    .col(ColumnDef::new(Certificate::Name).string().not_null())
                    .col(
                        ColumnDef::new(Certificate::Design)
                            .large_text(manager)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Certificate::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Certificate::IsSigned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Certificate::IsDistributed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Certificate::ArchiveUrl).string().null())
                    .col(ColumnDef::new(Certificate::ThumbnailUrl).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Signature::Table)
                    .if_not_exists()
                    .col(uuid_char(Signature::Id).primary_key())
                    .col(uuid_char(Signature::CertificateId))
                    .col(ColumnDef::new(Signature::SignerId).string().not_null())
                    .col(timestamp(Signature::CreatedDate, manager))
                    .col(timestamp(Signature::LastModified, manager))
                    .col(ColumnDef::new(Signature::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Signature::IsRequested)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Signature::IsSigned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(timestamp_null(Signature::LastRequestTime, manager))
                    .col(
                        ColumnDef::new(Signature::SignatureImage)
                            .large_blob(manager)
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-signature-certificate_id")
                            .from(Signature::Table, Signature::CertificateId)
                            .to(Certificate::Table, Certificate::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("index-signature-certificate_id-signer_id")
                    .table(Signature::Table)
                    .col(Signature::CertificateId)
                    .col(Signature::SignerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Participant::Table)
                    .if_not_exists()
                    .col(uuid_char(Participant::Id).primary_key())
                    .col(uuid_char(Participant::CertificateId))
                    .col(timestamp(Participant::CreatedDate, manager))
                    .col(timestamp(Participant::LastModified, manager))
                    .col(
                        ColumnDef::new(Participant::IsRevoked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Participant::CertificateUrl).string().null())
                    .col(
                        ColumnDef::new(Participant::EmailStatus)
                            .string()
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(Participant::IsDownloaded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-participant-certificate_id")
                            .from(Participant::Table, Participant::CertificateId)
                            .to(Certificate::Table, Certificate::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("index-participant-certificate_id")
                    .table(Participant::Table)
                    .col(Participant::CertificateId)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub enum Certificate {
    Table,
    Id,
    CreatedDate,
    LastModified,
    Name,
    Design,
    CreatedBy,
    IsSigned,
    IsDistributed,
    ArchiveUrl,
    ThumbnailUrl,
}

#[derive(DeriveIden)]
pub enum Signature {
    Table,
    Id,
    CertificateId,
    SignerId,
    CreatedDate,
    LastModified,
    CreatedBy,
    IsRequested,
    IsSigned,
    LastRequestTime,
    SignatureImage,
}

#[derive(DeriveIden)]
enum Participant {
    Table,
    Id,
    CertificateId,
    CreatedDate,
    LastModified,
    IsRevoked,
    CertificateUrl,
    EmailStatus,
    IsDownloaded,
}
