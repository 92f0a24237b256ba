use std::sync::Arc;

pub mod certificate_repository;
pub mod error;
pub mod object_repository;
pub mod participant_data_repository;
pub mod participant_repository;
pub mod signature_repository;

use certificate_repository::CertificateRepository;
use object_repository::ObjectRepository;
use participant_data_repository::ParticipantDataRepository;
use participant_repository::ParticipantRepository;
use signature_repository::SignatureRepository;

pub trait DataRepository: Send + Sync {
    fn get_certificate_repository(&self) -> Arc<dyn CertificateRepository>;
    fn get_signature_repository(&self) -> Arc<dyn SignatureRepository>;
    fn get_participant_repository(&self) -> Arc<dyn ParticipantRepository>;
    fn get_participant_data_repository(&self) -> Arc<dyn ParticipantDataRepository>;
    fn get_object_repository(&self) -> Arc<dyn ObjectRepository>;
}
