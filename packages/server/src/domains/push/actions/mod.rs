//! Push notification dispatch via FCM.

use serde_json::json;
use tracing::warn;

use crate::common::{EngagementError, ServiceDeps};
use crate::domains::messaging::{Flavour, PUSH_SENT_TOPIC};

use super::fcm::FcmNotification;

/// Send a data notification to the given registration tokens. Returns true
/// when FCM delivered to at least one token.
pub async fn send_notification(
    registration_tokens: &[String],
    title: &str,
    body: &str,
    data: Option<serde_json::Value>,
    deps: &ServiceDeps,
) -> Result<bool, EngagementError> {
    if registration_tokens.is_empty() {
        return Err(EngagementError::validation(
            "at least one registration token is required",
        ));
    }

    let notification = FcmNotification {
        title: title.to_string(),
        body: body.to_string(),
    };
    let response = deps
        .fcm
        .send(registration_tokens, &notification, data.as_ref())
        .await?;

    let publish = deps
        .publisher
        .notify(
            PUSH_SENT_TOPIC,
            "fcm",
            Flavour::Consumer,
            json!({
                "success": response.success,
                "failure": response.failure,
                "tokens": registration_tokens.len(),
            }),
            Default::default(),
        )
        .await;
    if let Err(err) = publish {
        warn!(error = %err, "failed to publish push.sent event");
    }

    Ok(response.success > 0)
}
