//! Firebase Cloud Messaging client (legacy HTTP API).

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::common::EngagementError;

const FCM_SEND_URL: &str = "https://fcm.googleapis.com/fcm/send";
const HTTP_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct FcmNotification {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Serialize)]
struct FcmRequest<'a> {
    registration_ids: &'a [String],
    notification: &'a FcmNotification,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct FcmResponse {
    pub success: i64,
    pub failure: i64,
    #[serde(default)]
    pub results: Vec<FcmResult>,
}

#[derive(Debug, Deserialize)]
pub struct FcmResult {
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

pub struct FcmClient {
    client: reqwest::Client,
    server_key: String,
}

impl FcmClient {
    pub fn new(server_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECONDS))
            .build()
            .unwrap_or_default();
        Self { client, server_key }
    }

    /// Send a notification to the given registration tokens.
    pub async fn send(
        &self,
        registration_tokens: &[String],
        notification: &FcmNotification,
        data: Option<&serde_json::Value>,
    ) -> Result<FcmResponse, EngagementError> {
        let request = FcmRequest {
            registration_ids: registration_tokens,
            notification,
            data,
        };

        let response = self
            .client
            .post(FCM_SEND_URL)
            .header("Authorization", format!("key={}", self.server_key))
            .json(&request)
            .send()
            .await
            .map_err(|err| EngagementError::Provider(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngagementError::Provider(format!(
                "FCM returned {}: {}",
                status, body
            )));
        }

        response
            .json::<FcmResponse>()
            .await
            .map_err(|err| EngagementError::Provider(err.to_string()))
    }
}
