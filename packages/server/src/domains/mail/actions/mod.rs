//! Email dispatch via Mailgun.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::common::{validate_email, EngagementError, MessageCallback, ServiceDeps};
use crate::domains::messaging::{Flavour, EMAIL_SENT_TOPIC};

use super::EmailLog;

/// Delivery event posted by the Mailgun webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailgunEvent {
    pub event: String,
    pub recipient: String,
    #[serde(rename = "message-id", alias = "Message-Id")]
    pub message_id: String,
}

/// Send an email to one or more recipients. Returns `(status, message_id)`.
/// One log row is written per recipient; the shared provider message id ties
/// them to later delivery events.
pub async fn send_email(
    subject: &str,
    text: &str,
    html: Option<String>,
    to: &[String],
    deps: &ServiceDeps,
) -> Result<(String, String), EngagementError> {
    if to.is_empty() {
        return Err(EngagementError::validation("no recipients supplied"));
    }

    let recipients = to
        .iter()
        .map(|address| validate_email(address))
        .collect::<Result<Vec<_>, _>>()?;

    let response = deps
        .mailgun
        .send(subject, text, html.as_deref(), &recipients)
        .await?;

    for recipient in &recipients {
        EmailLog::create(recipient, subject, Some(&response.id), &deps.pool).await?;

        let publish = deps
            .publisher
            .notify(
                EMAIL_SENT_TOPIC,
                recipient,
                Flavour::Consumer,
                json!({ "message_id": response.id, "subject": subject }),
                Default::default(),
            )
            .await;
        if let Err(err) = publish {
            warn!(error = %err, recipient, "failed to publish email.sent event");
        }
    }

    Ok(("ok".to_string(), response.id))
}

/// Send a plain email without an HTML body. Returns the provider message id.
pub async fn simple_email(
    subject: &str,
    text: &str,
    to: &[String],
    deps: &ServiceDeps,
) -> Result<String, EngagementError> {
    let (_, message_id) = send_email(subject, text, None, to, deps).await?;
    Ok(message_id)
}

/// Record a Mailgun delivery event and attach the status to the matching
/// log rows.
pub async fn update_delivery_status(
    event: MailgunEvent,
    deps: &ServiceDeps,
) -> Result<Vec<EmailLog>, EngagementError> {
    let payload =
        serde_json::to_value(&event).map_err(|err| EngagementError::validation(err.to_string()))?;
    MessageCallback::create("mailgun", payload, &deps.pool).await?;

    let updated = EmailLog::update_status(&event.message_id, &event.event, &deps.pool).await?;
    Ok(updated)
}
