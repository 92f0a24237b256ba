use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::config::core_config::MailConfig;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail relay error: `{0}`")]
    Relay(#[from] reqwest::Error),
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, address: &str, attachment_url: &str) -> Result<(), MailError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RelayMailRequest<'a> {
    to: &'a str,
    subject: &'a str,
    attachment_url: &'a str,
}

/// Hands mails over to an HTTP mail relay
pub struct RelayMailSender {
    client: reqwest::Client,
    relay_url: Url,
    subject: String,
}

impl RelayMailSender {
    pub fn new(client: reqwest::Client, config: &MailConfig) -> Self {
        Self {
            client,
            relay_url: config.relay_url.to_owned(),
            subject: config.subject.to_owned(),
        }
    }
}

#[async_trait]
impl MailSender for RelayMailSender {
    async fn send(&self, address: &str, attachment_url: &str) -> Result<(), MailError> {
        self.client
            .post(self.relay_url.to_owned())
            .json(&RelayMailRequest {
                to: address,
                subject: &self.subject,
                attachment_url,
            })
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!(relay = %self.relay_url, "Mail handed over to relay");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn sender(server: &MockServer) -> RelayMailSender {
        RelayMailSender::new(
            reqwest::Client::new(),
            &MailConfig {
                relay_url: format!("{}/send", server.uri()).parse().unwrap(),
                subject: "Your certificate".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_send_posts_to_relay() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send"))
            .and(body_json(json!({
                "to": "ann@example.com",
                "subject": "Your certificate",
                "attachmentUrl": "https://api.example.com/files/download/b/c.pdf"
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        sender(&server)
            .send(
                "ann@example.com",
                "https://api.example.com/files/download/b/c.pdf",
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_send_relay_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        assert!(sender(&server).send("ann@example.com", "url").await.is_err());
    }
}
