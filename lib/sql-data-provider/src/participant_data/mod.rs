use sea_orm::DatabaseConnection;

pub mod mapper;
pub mod repository;

/// Operates on the document database, never on the index database
pub(crate) struct ParticipantDataProvider {
    pub db: DatabaseConnection,
}
