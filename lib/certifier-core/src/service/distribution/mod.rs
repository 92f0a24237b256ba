use std::sync::Arc;

use crate::config::core_config::DistributionConfig;
use crate::proto::participant_store::ParticipantStore;
use crate::provider::mail::MailSender;
use crate::repository::certificate_repository::CertificateRepository;

pub mod dto;
pub mod service;

#[derive(Clone)]
pub struct DistributionService {
    certificate_repository: Arc<dyn CertificateRepository>,
    participant_store: ParticipantStore,
    mail_sender: Arc<dyn MailSender>,
    concurrency: usize,
}

impl DistributionService {
    pub fn new(
        certificate_repository: Arc<dyn CertificateRepository>,
        participant_store: ParticipantStore,
        mail_sender: Arc<dyn MailSender>,
        config: &DistributionConfig,
    ) -> Self {
        Self {
            certificate_repository,
            participant_store,
            mail_sender,
            concurrency: config.concurrency.max(1),
        }
    }
}

#[cfg(test)]
mod test;
