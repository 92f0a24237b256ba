use std::collections::{HashMap, HashSet};

use certifier_crypto::encryption::{decrypt_data, encrypt_data};
use secrecy::ExposeSecret;
use shared_types::{CertificateId, SignerId};
use time::OffsetDateTime;

use super::SignatureService;
use super::dto::{ReconcileSignersResultDTO, SignatureResponseDTO};
use crate::model::certificate::{Certificate, UpdateCertificateRequest};
use crate::model::signature::{Signature, UpdateSignatureRequest};
use crate::provider::notification::NotificationEvent;
use crate::repository::error::DataLayerError;
use crate::service::error::{
    BusinessLogicError, EntityNotFoundError, ServiceError, ValidationError,
};

impl SignatureService {
    pub async fn get_signatures(
        &self,
        certificate_id: &CertificateId,
    ) -> Result<Vec<SignatureResponseDTO>, ServiceError> {
        Ok(self
            .signature_repository
            .get_by_certificate(certificate_id)
            .await?
            .into_iter()
            .map(SignatureResponseDTO::from)
            .collect())
    }

    /// Creates rows for signers that do not have one yet. Returns the signers actually created.
    pub async fn bulk_create(
        &self,
        certificate_id: &CertificateId,
        signer_ids: &[SignerId],
        created_by: &str,
    ) -> Result<Vec<SignerId>, ServiceError> {
        let mut known: HashSet<SignerId> = self
            .signature_repository
            .get_by_certificate(certificate_id)
            .await?
            .into_iter()
            .map(|signature| signature.signer_id)
            .collect();

        let mut created = vec![];
        for signer_id in signer_ids {
            if !known.insert(signer_id.to_owned()) {
                continue;
            }

            let signature = Signature::new(
                *certificate_id,
                signer_id.to_owned(),
                created_by.to_owned(),
            );
            match self.signature_repository.create(signature).await {
                Ok(_) => created.push(signer_id.to_owned()),
                Err(DataLayerError::AlreadyExists) => {
                    tracing::debug!(%certificate_id, %signer_id, "Signature already exists");
                }
                Err(error) => return Err(error.into()),
            }
        }

        Ok(created)
    }

    pub async fn delete(
        &self,
        certificate_id: &CertificateId,
        signer_id: &SignerId,
    ) -> Result<(), ServiceError> {
        Ok(self
            .signature_repository
            .delete(certificate_id, signer_id)
            .await?)
    }

    /// `true` iff every signature of the certificate is signed, vacuously `true` without any
    pub async fn all_complete(&self, certificate_id: &CertificateId) -> Result<bool, ServiceError> {
        Ok(self
            .signature_repository
            .get_by_certificate(certificate_id)
            .await?
            .iter()
            .all(|signature| signature.is_signed))
    }

    /// Marks the signature requested and notifies the signer
    pub async fn mark_requested(
        &self,
        certificate_id: &CertificateId,
        signer_id: &SignerId,
    ) -> Result<(), ServiceError> {
        let signature = self.get_signature(certificate_id, signer_id).await?;

        self.signature_repository
            .update(
                &signature.id,
                UpdateSignatureRequest {
                    is_requested: Some(true),
                    last_request_time: Some(OffsetDateTime::now_utc()),
                    ..Default::default()
                },
            )
            .await?;

        self.notify(NotificationEvent::SignatureRequested {
            certificate_id: *certificate_id,
            signer_id: signer_id.to_owned(),
        })
        .await;
        Ok(())
    }

    /// Stores the encrypted signature image and recomputes the certificate signed flag
    pub async fn sign(
        &self,
        certificate_id: &CertificateId,
        signer_id: &SignerId,
        image: Vec<u8>,
    ) -> Result<(), ServiceError> {
        if image.is_empty() {
            return Err(ValidationError::InvalidSignatureImage("empty image".to_string()).into());
        }
        image::guess_format(&image)
            .map_err(|err| ValidationError::InvalidSignatureImage(err.to_string()))?;

        let signature = self.get_signature(certificate_id, signer_id).await?;
        if !signature.is_requested {
            return Err(BusinessLogicError::SignatureNotRequested(signer_id.to_owned()).into());
        }

        let encrypted = encrypt_data(&image, &self.encryption_key)?;
        self.signature_repository
            .update(
                &signature.id,
                UpdateSignatureRequest {
                    is_signed: Some(true),
                    signature_image: Some(Some(encrypted)),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(%certificate_id, %signer_id, "Certificate signed by signer");
        self.refresh_certificate_signed(certificate_id).await?;
        Ok(())
    }

    /// Drops the stored signature and asks the signer to sign again
    pub async fn request_resign(
        &self,
        certificate_id: &CertificateId,
        signer_id: &SignerId,
    ) -> Result<(), ServiceError> {
        let signature = self.get_signature(certificate_id, signer_id).await?;

        self.signature_repository
            .update(
                &signature.id,
                UpdateSignatureRequest {
                    is_requested: Some(true),
                    is_signed: Some(false),
                    last_request_time: Some(OffsetDateTime::now_utc()),
                    signature_image: Some(None),
                },
            )
            .await?;

        self.certificate_repository
            .update(certificate_id, UpdateCertificateRequest::signed(false))
            .await?;

        self.notify(NotificationEvent::SignatureRequested {
            certificate_id: *certificate_id,
            signer_id: signer_id.to_owned(),
        })
        .await;
        Ok(())
    }

    /// Aligns signature rows with the signer anchors of the current design
    pub async fn reconcile_signers(
        &self,
        certificate: &Certificate,
        new_signer_ids: &[SignerId],
    ) -> Result<ReconcileSignersResultDTO, ServiceError> {
        let existing: Vec<SignerId> = self
            .signature_repository
            .get_by_certificate(&certificate.id)
            .await?
            .into_iter()
            .map(|signature| signature.signer_id)
            .collect();

        let removed: Vec<SignerId> = existing
            .iter()
            .filter(|signer_id| !new_signer_ids.contains(signer_id))
            .cloned()
            .collect();
        for signer_id in &removed {
            self.delete(&certificate.id, signer_id).await?;
        }

        let added = self
            .bulk_create(&certificate.id, new_signer_ids, &certificate.created_by)
            .await?;
        for signer_id in &added {
            self.mark_requested(&certificate.id, signer_id).await?;
        }

        let is_signed = self.refresh_certificate_signed(&certificate.id).await?;

        if !added.is_empty() || !removed.is_empty() {
            tracing::info!(
                certificate_id = %certificate.id,
                added = added.len(),
                removed = removed.len(),
                is_signed,
                "Signers reconciled"
            );
        }

        Ok(ReconcileSignersResultDTO {
            added,
            removed,
            is_signed,
        })
    }

    /// Plain signature images of every signed signature. Undecryptable ones are left out.
    pub async fn decrypt_signatures(
        &self,
        certificate_id: &CertificateId,
    ) -> Result<HashMap<SignerId, Vec<u8>>, ServiceError> {
        let signatures = self
            .signature_repository
            .get_by_certificate(certificate_id)
            .await?;

        Ok(signatures
            .into_iter()
            .filter(|signature| signature.is_signed)
            .filter_map(|signature| {
                let encrypted = signature.signature_image?;
                match decrypt_data(&encrypted, &self.encryption_key) {
                    Ok(image) => Some((signature.signer_id, image.expose_secret().to_vec())),
                    Err(error) => {
                        tracing::warn!(%certificate_id, signer_id = %signature.signer_id, %error, "Failed to decrypt signature");
                        None
                    }
                }
            })
            .collect())
    }

    /// Stores the AND of all signature flags on the certificate, notifying the owner when the
    /// certificate becomes signed. Returns the new flag.
    pub(crate) async fn refresh_certificate_signed(
        &self,
        certificate_id: &CertificateId,
    ) -> Result<bool, ServiceError> {
        let all_complete = self.all_complete(certificate_id).await?;

        let certificate = self
            .certificate_repository
            .get(certificate_id)
            .await?
            .ok_or(EntityNotFoundError::Certificate(*certificate_id))?;

        if certificate.is_signed == all_complete {
            return Ok(all_complete);
        }

        self.certificate_repository
            .update(certificate_id, UpdateCertificateRequest::signed(all_complete))
            .await?;

        if all_complete {
            tracing::info!(%certificate_id, "All signatures complete");
            self.notify(NotificationEvent::CertificateSigned {
                certificate_id: *certificate_id,
                owner: certificate.created_by,
            })
            .await;
        }

        Ok(all_complete)
    }

    async fn get_signature(
        &self,
        certificate_id: &CertificateId,
        signer_id: &SignerId,
    ) -> Result<Signature, ServiceError> {
        Ok(self
            .signature_repository
            .get(certificate_id, signer_id)
            .await?
            .ok_or_else(|| EntityNotFoundError::Signature {
                certificate_id: *certificate_id,
                signer_id: signer_id.to_owned(),
            })?)
    }

    async fn notify(&self, event: NotificationEvent) {
        if let Err(error) = self.notifier.notify(event).await {
            tracing::warn!(%error, "Failed to send notification");
        }
    }
}
