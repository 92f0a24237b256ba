//! Schema of the relational index store ([`Migrator`]) and of the participant document store
//! ([`DocumentMigrator`]). The two stores live in separate databases.

pub use sea_orm_migration::prelude::*;

pub(crate) mod datatype;

mod m20250901_000001_initial;
mod m20250905_000001_stored_object;
mod m20250912_000001_signature_request_index;

mod document;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_initial::Migration),
            Box::new(m20250905_000001_stored_object::Migration),
            Box::new(m20250912_000001_signature_request_index::Migration),
        ]
    }
}

pub struct DocumentMigrator;

#[async_trait::async_trait]
impl MigratorTrait for DocumentMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(
            document::m20250901_000001_participant_data::Migration,
        )]
    }

    fn migration_table_name() -> DynIden {
        Alias::new("seaql_document_migrations").into_iden()
    }
}
