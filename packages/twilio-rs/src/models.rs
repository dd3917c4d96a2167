use serde::{Deserialize, Serialize};

/// Response from the Twilio Messages API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub sid: String,
    pub status: String,
    pub to: String,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl MessageResponse {
    /// Whether Twilio accepted the message for delivery.
    pub fn accepted(&self) -> bool {
        !matches!(self.status.as_str(), "failed" | "undelivered")
    }
}
