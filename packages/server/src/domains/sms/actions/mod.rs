//! SMS dispatch via the Africa's Talking gateway.

use africastalking::models::SendMessageResponse;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::common::{normalize_msisdn, EngagementError, MessageCallback, ServiceDeps};
use crate::domains::messaging::{Flavour, SMS_SENT_TOPIC};

use super::SmsLog;

/// Delivery report posted by the gateway after a send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub id: String,
    pub status: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: Option<String>,
    #[serde(rename = "networkCode")]
    pub network_code: Option<String>,
    #[serde(rename = "failureReason")]
    pub failure_reason: Option<String>,
}

/// Send a message to a single recipient.
pub async fn send(
    to: &str,
    message: &str,
    deps: &ServiceDeps,
) -> Result<SendMessageResponse, EngagementError> {
    let recipients = [to.to_string()];
    send_to_many(message, &recipients, deps).await
}

/// Send one message to many recipients. Every recipient is normalized up
/// front so a single malformed number fails the whole call before anything
/// is dispatched. One log row is written per recipient the gateway accepted.
pub async fn send_to_many(
    message: &str,
    recipients: &[String],
    deps: &ServiceDeps,
) -> Result<SendMessageResponse, EngagementError> {
    if recipients.is_empty() {
        return Err(EngagementError::validation("no recipients supplied"));
    }

    let normalized = recipients
        .iter()
        .map(|r| normalize_msisdn(r))
        .collect::<Result<Vec<_>, _>>()?;

    let response = deps.sms_gateway.send(&normalized.join(","), message).await?;

    if let Some(data) = &response.sms_message_data {
        for recipient in &data.recipients {
            SmsLog::create(
                &recipient.number,
                message,
                "africastalking",
                recipient.message_id.as_deref(),
                &deps.pool,
            )
            .await?;

            let publish = deps
                .publisher
                .notify(
                    SMS_SENT_TOPIC,
                    &recipient.number,
                    Flavour::Consumer,
                    json!({
                        "message_id": recipient.message_id,
                        "status": recipient.status,
                    }),
                    Default::default(),
                )
                .await;
            if let Err(err) = publish {
                warn!(error = %err, number = %recipient.number, "failed to publish sms.sent event");
            }
        }
    }

    Ok(response)
}

/// Record a gateway delivery report and attach the status to the matching
/// log row. Returns the updated row, if the message id was known.
pub async fn save_delivery_report(
    report: DeliveryReport,
    deps: &ServiceDeps,
) -> Result<Option<SmsLog>, EngagementError> {
    let payload =
        serde_json::to_value(&report).map_err(|err| EngagementError::validation(err.to_string()))?;
    MessageCallback::create("africastalking", payload, &deps.pool).await?;

    let updated = SmsLog::update_status(&report.id, &report.status, &deps.pool).await?;
    Ok(updated)
}
