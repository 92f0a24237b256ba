pub mod artifact_publisher;
pub mod participant_store;
pub mod worker_pool;
