use sea_orm_migration::prelude::*;

use crate::m20250901_000001_initial::Signature;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Pending signature requests are listed per certificate on every reminder round
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("index-signature-certificate_id-is_signed")
                    .table(Signature::Table)
                    .col(Signature::CertificateId)
                    .col(Signature::IsSigned)
                    .to_owned(),
            )
            .await
    }
}
