use async_trait::async_trait;
use serde::Serialize;

use crate::config::MailConfig;
use crate::verification::errors::MailError;
use crate::verification::models::MailMessage;
use crate::verification::ports::MailSender;

/// Mail sender backed by a transactional-mail HTTP API.
///
/// Posts one JSON payload per message, authenticated with an `api-key`
/// header. The API contract matches the common transactional providers
/// (sender, recipient list, subject, HTML content).
pub struct HttpApiMailSender {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from_address: String,
}

#[derive(Debug, Serialize)]
struct Address {
    email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailBody {
    sender: Address,
    to: Vec<Address>,
    subject: String,
    html_content: String,
}

impl HttpApiMailSender {
    pub fn new(config: &MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
        }
    }
}

#[async_trait]
impl MailSender for HttpApiMailSender {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let body = SendEmailBody {
            sender: Address {
                email: self.from_address.clone(),
            },
            to: vec![Address {
                email: message.to.clone(),
            }],
            subject: message.subject.clone(),
            html_content: message.html_body.clone(),
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| MailError::SendFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MailError::Rejected(response.status().as_u16()));
        }

        Ok(())
    }
}

/// Mail sender that only logs, for development and tests.
#[derive(Debug, Clone, Default)]
pub struct LogMailSender;

#[async_trait]
impl MailSender for LogMailSender {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "Mail send stub"
        );
        Ok(())
    }
}
