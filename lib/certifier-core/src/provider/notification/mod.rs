use async_trait::async_trait;
use serde::Serialize;
use shared_types::{CertificateId, SignerId};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Webhook error: `{0}`")]
    Webhook(#[from] reqwest::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationEvent {
    /// A signer has to (re)sign the certificate
    #[serde(rename_all = "camelCase")]
    SignatureRequested {
        certificate_id: CertificateId,
        signer_id: SignerId,
    },
    /// All signatures of the certificate are complete
    #[serde(rename_all = "camelCase")]
    CertificateSigned {
        certificate_id: CertificateId,
        owner: String,
    },
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: NotificationEvent) -> Result<(), NotificationError>;
}

pub struct WebhookNotifier {
    client: reqwest::Client,
    webhook_url: Option<Url>,
}

impl WebhookNotifier {
    pub fn new(client: reqwest::Client, webhook_url: Option<Url>) -> Self {
        Self {
            client,
            webhook_url,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, event: NotificationEvent) -> Result<(), NotificationError> {
        let Some(webhook_url) = &self.webhook_url else {
            tracing::info!(?event, "No notification webhook configured, skipping");
            return Ok(());
        };

        self.client
            .post(webhook_url.to_owned())
            .json(&event)
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!(?event, "Notification sent");
        Ok(())
    }
}
