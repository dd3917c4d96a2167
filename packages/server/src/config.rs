use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables.
///
/// All provider credentials are read here, once, and handed to the adapters
/// by the composition root. A missing variable is a startup error, not a
/// runtime panic.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub nats_url: String,
    pub port: u16,
    /// `sandbox`, `staging` or `production`; used for the SMS gateway host
    /// selection and for namespacing pub/sub subjects.
    pub environment: String,

    // Africa's Talking (primary SMS transport)
    pub ait_username: String,
    pub ait_api_key: String,
    pub ait_sender_id: String,

    // Twilio (WhatsApp and fallback SMS)
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_whatsapp_sender: String,
    pub twilio_sms_sender: String,

    // Mailgun
    pub mailgun_api_key: String,
    pub mailgun_domain: String,
    pub mailgun_from: String,

    // Firebase Cloud Messaging
    pub fcm_server_key: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            nats_url: env::var("NATS_URL")
                .unwrap_or_else(|_| "nats://localhost:4222".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "staging".to_string()),
            ait_username: env::var("AIT_USERNAME").context("AIT_USERNAME must be set")?,
            ait_api_key: env::var("AIT_API_KEY").context("AIT_API_KEY must be set")?,
            ait_sender_id: env::var("AIT_SENDER_ID").context("AIT_SENDER_ID must be set")?,
            twilio_account_sid: env::var("TWILIO_ACCOUNT_SID")
                .context("TWILIO_ACCOUNT_SID must be set")?,
            twilio_auth_token: env::var("TWILIO_AUTH_TOKEN")
                .context("TWILIO_AUTH_TOKEN must be set")?,
            twilio_whatsapp_sender: env::var("TWILIO_WHATSAPP_SENDER")
                .context("TWILIO_WHATSAPP_SENDER must be set")?,
            twilio_sms_sender: env::var("TWILIO_SMS_NUMBER")
                .context("TWILIO_SMS_NUMBER must be set")?,
            mailgun_api_key: env::var("MAILGUN_API_KEY")
                .context("MAILGUN_API_KEY must be set")?,
            mailgun_domain: env::var("MAILGUN_DOMAIN").context("MAILGUN_DOMAIN must be set")?,
            mailgun_from: env::var("MAILGUN_FROM").context("MAILGUN_FROM must be set")?,
            fcm_server_key: env::var("FCM_SERVER_KEY").context("FCM_SERVER_KEY must be set")?,
        })
    }
}
