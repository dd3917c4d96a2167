use serde::{Deserialize, Serialize};

/// Top-level response from the Africa's Talking messaging API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    #[serde(rename = "SMSMessageData")]
    pub sms_message_data: Option<SmsMessageData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsMessageData {
    #[serde(rename = "Message")]
    pub message: Option<String>,
    #[serde(rename = "Recipients", default)]
    pub recipients: Vec<Recipient>,
}

/// Per-recipient delivery status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    #[serde(rename = "statusCode")]
    pub status_code: Option<i32>,
    pub number: String,
    pub status: String,
    pub cost: Option<String>,
    #[serde(rename = "messageId")]
    pub message_id: Option<String>,
}
