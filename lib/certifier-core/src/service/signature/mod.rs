use std::sync::Arc;

use secrecy::SecretSlice;

use crate::provider::notification::Notifier;
use crate::repository::certificate_repository::CertificateRepository;
use crate::repository::signature_repository::SignatureRepository;

pub mod dto;
pub(crate) mod mapper;
pub mod service;

#[derive(Clone)]
pub struct SignatureService {
    signature_repository: Arc<dyn SignatureRepository>,
    certificate_repository: Arc<dyn CertificateRepository>,
    notifier: Arc<dyn Notifier>,
    encryption_key: Arc<SecretSlice<u8>>,
}

impl SignatureService {
    pub fn new(
        signature_repository: Arc<dyn SignatureRepository>,
        certificate_repository: Arc<dyn CertificateRepository>,
        notifier: Arc<dyn Notifier>,
        encryption_key: Arc<SecretSlice<u8>>,
    ) -> Self {
        Self {
            signature_repository,
            certificate_repository,
            notifier,
            encryption_key,
        }
    }
}
