//! Minimal Mailgun messages client.
//!
//! Sends through `/v3/{domain}/messages` with `api` basic auth and a
//! form-encoded body. Sandbox domains must use the US API base; everything
//! else goes through the EU base by default.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

const API_BASE_US: &str = "https://api.mailgun.net/v3";
const API_BASE_EU: &str = "https://api.eu.mailgun.net/v3";
const HTTP_TIMEOUT_SECONDS: u64 = 15;

#[derive(Debug, thiserror::Error)]
pub enum MailgunError {
    #[error("request to Mailgun failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Mailgun returned {status}: {body}")]
    Api { status: u16, body: String },
}

#[derive(Debug, Clone)]
pub struct MailgunOptions {
    pub api_key: String,
    pub domain: String,
    /// Sender address, e.g. `Engagement <no-reply@example.com>`.
    pub from: String,
}

/// Response from a successful send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct MailgunService {
    options: MailgunOptions,
    client: Client,
}

impl MailgunService {
    pub fn new(options: MailgunOptions) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECONDS))
            .build()
            .unwrap_or_default();
        Self { options, client }
    }

    fn messages_url(&self) -> String {
        let base = if self.options.domain.contains("sandbox") {
            API_BASE_US
        } else {
            API_BASE_EU
        };
        format!("{}/{}/messages", base, self.options.domain)
    }

    /// Send an email to one or more recipients. `html` overrides the plain
    /// text body for clients that render it.
    pub async fn send(
        &self,
        subject: &str,
        text: &str,
        html: Option<&str>,
        to: &[String],
    ) -> Result<SendMessageResponse, MailgunError> {
        let mut form: Vec<(&'static str, String)> = vec![
            ("from", self.options.from.clone()),
            ("subject", subject.to_string()),
            ("text", text.to_string()),
        ];
        for recipient in to {
            form.push(("to", recipient.clone()));
        }
        if let Some(html) = html {
            form.push(("html", html.to_string()));
        }

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth("api", Some(&self.options.api_key))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailgunError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<SendMessageResponse>().await?)
    }
}
