//! Minimal Twilio Messages API client.
//!
//! Covers the two transports the engagement backend needs: WhatsApp messages
//! and plain SMS, both sent through the `Messages.json` endpoint with basic
//! auth and form-encoded bodies.

use std::collections::HashMap;
use std::time::Duration;

pub mod models;

use reqwest::Client;

use crate::models::MessageResponse;

const TWILIO_API_BASE_URL: &str = "https://api.twilio.com/2010-04-01/Accounts";
const HTTP_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum TwilioError {
    #[error("request to Twilio failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Twilio returned {status}: {body}")]
    Api { status: u16, body: String },
}

#[derive(Debug, Clone)]
pub struct TwilioOptions {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender for WhatsApp messages, e.g. `+14155238886`.
    pub whatsapp_sender: String,
    /// Sender for plain SMS messages.
    pub sms_sender: String,
}

#[derive(Debug, Clone)]
pub struct TwilioService {
    options: TwilioOptions,
    client: Client,
}

impl TwilioService {
    pub fn new(options: TwilioOptions) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECONDS))
            .build()
            .unwrap_or_default();
        Self { options, client }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/{}/Messages.json",
            TWILIO_API_BASE_URL, self.options.account_sid
        )
    }

    async fn send_message(
        &self,
        form: HashMap<&'static str, String>,
    ) -> Result<MessageResponse, TwilioError> {
        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(
                &self.options.account_sid,
                Some(&self.options.auth_token),
            )
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TwilioError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<MessageResponse>().await?)
    }

    /// Send a WhatsApp message. `to` must be an E.164 phone number; the
    /// `whatsapp:` channel prefix is added here.
    pub async fn send_whatsapp(
        &self,
        to: &str,
        body: &str,
    ) -> Result<MessageResponse, TwilioError> {
        let mut form: HashMap<&'static str, String> = HashMap::new();
        form.insert("From", format!("whatsapp:{}", self.options.whatsapp_sender));
        form.insert("To", format!("whatsapp:{}", to));
        form.insert("Body", body.to_string());
        self.send_message(form).await
    }

    /// Send a plain SMS. `to` must be an E.164 phone number.
    pub async fn send_sms(&self, to: &str, body: &str) -> Result<MessageResponse, TwilioError> {
        let mut form: HashMap<&'static str, String> = HashMap::new();
        form.insert("From", self.options.sms_sender.clone());
        form.insert("To", to.to_string());
        form.insert("Body", body.to_string());
        self.send_message(form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TwilioService {
        TwilioService::new(TwilioOptions {
            account_sid: "ACxxxx".to_string(),
            auth_token: "token".to_string(),
            whatsapp_sender: "+14155238886".to_string(),
            sms_sender: "+15005550006".to_string(),
        })
    }

    #[test]
    fn messages_url_embeds_account_sid() {
        assert_eq!(
            service().messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/ACxxxx/Messages.json"
        );
    }

    #[test]
    fn message_response_parses_twilio_json() {
        let json = r#"{
            "sid": "SM1234",
            "status": "queued",
            "to": "whatsapp:+254711223344",
            "from": "whatsapp:+14155238886",
            "error_code": null,
            "error_message": null
        }"#;
        let parsed: MessageResponse = serde_json::from_str(json).expect("valid message JSON");
        assert_eq!(parsed.sid, "SM1234");
        assert_eq!(parsed.status, "queued");
        assert!(parsed.error_code.is_none());
    }
}
