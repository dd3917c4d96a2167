//! Minimal Africa's Talking bulk SMS client.
//!
//! Sends through the `/version1/messaging` endpoint with an `apikey` header
//! and a form-encoded body. The sandbox and production environments use
//! different hosts; everything else is identical.

use std::collections::HashMap;
use std::time::Duration;

pub mod models;

use reqwest::Client;

use crate::models::SendMessageResponse;

const HTTP_TIMEOUT_SECONDS: u64 = 10;

/// Error string Africa's Talking returns in the body (with a 200 status)
/// when the API key is wrong.
const AUTHENTICATION_ERROR: &str = "The supplied authentication is invalid";

#[derive(Debug, thiserror::Error)]
pub enum AfricasTalkingError {
    #[error("request to Africa's Talking failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Africa's Talking returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Africa's Talking rejected the API credentials")]
    Authentication,

    #[error("unable to parse Africa's Talking response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct AfricasTalkingOptions {
    pub username: String,
    pub api_key: String,
    pub sender_id: String,
    /// `sandbox` or `production`; anything other than `sandbox` selects the
    /// production host.
    pub environment: String,
}

#[derive(Debug, Clone)]
pub struct AfricasTalkingService {
    options: AfricasTalkingOptions,
    client: Client,
}

/// Host for the messaging API in the given environment.
pub fn api_host(environment: &str) -> String {
    if environment == "sandbox" {
        "https://api.sandbox.africastalking.com".to_string()
    } else {
        "https://api.africastalking.com".to_string()
    }
}

impl AfricasTalkingService {
    pub fn new(options: AfricasTalkingOptions) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECONDS))
            .build()
            .unwrap_or_default();
        Self { options, client }
    }

    fn messaging_url(&self) -> String {
        format!("{}/version1/messaging", api_host(&self.options.environment))
    }

    /// Send `message` to one or more recipients. `to` is a comma-separated
    /// list of E.164 phone numbers, as the API expects.
    pub async fn send(
        &self,
        to: &str,
        message: &str,
    ) -> Result<SendMessageResponse, AfricasTalkingError> {
        let mut form: HashMap<&'static str, String> = HashMap::new();
        form.insert("username", self.options.username.clone());
        form.insert("to", to.to_string());
        form.insert("message", message.to_string());
        form.insert("from", self.options.sender_id.clone());

        let response = self
            .client
            .post(self.messaging_url())
            .header("apikey", &self.options.api_key)
            .header("Accept", "application/json")
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if body.contains(AUTHENTICATION_ERROR) {
            return Err(AfricasTalkingError::Authentication);
        }
        if !status.is_success() {
            return Err(AfricasTalkingError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sandbox_and_production_hosts_differ() {
        assert_eq!(
            api_host("sandbox"),
            "https://api.sandbox.africastalking.com"
        );
        assert_eq!(api_host("production"), "https://api.africastalking.com");
        assert_eq!(api_host("staging"), "https://api.africastalking.com");
    }

    #[test]
    fn response_parses_recipients() {
        let json = r#"{
            "SMSMessageData": {
                "Message": "Sent to 1/1 Total Cost: KES 0.8000",
                "Recipients": [
                    {
                        "statusCode": 101,
                        "number": "+254711223344",
                        "status": "Success",
                        "cost": "KES 0.8000",
                        "messageId": "ATXid_abc123"
                    }
                ]
            }
        }"#;
        let parsed: SendMessageResponse =
            serde_json::from_str(json).expect("valid AIT response JSON");
        let data = parsed.sms_message_data.expect("message data present");
        assert_eq!(data.recipients.len(), 1);
        assert_eq!(data.recipients[0].number, "+254711223344");
        assert_eq!(data.recipients[0].status, "Success");
        assert_eq!(
            data.recipients[0].message_id.as_deref(),
            Some("ATXid_abc123")
        );
    }
}
