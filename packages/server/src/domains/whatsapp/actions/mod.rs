//! WhatsApp sends via the Twilio Messages API.

use std::collections::HashMap;

use crate::common::{normalize_msisdn, EngagementError, MessageCallback, ServiceDeps};

/// The user-facing verification message sent over WhatsApp.
fn verification_message(code: &str) -> String {
    format!(
        "Your phone number verification code is {}. It is valid for the next 60 minutes.",
        code
    )
}

/// Send a phone number verification code over WhatsApp. Returns whether
/// Twilio accepted the message.
pub async fn phone_number_verification_code(
    to: &str,
    code: &str,
    deps: &ServiceDeps,
) -> Result<bool, EngagementError> {
    if code.is_empty() {
        return Err(EngagementError::validation("verification code is empty"));
    }
    let to = normalize_msisdn(to)?;
    let response = deps
        .twilio
        .send_whatsapp(&to, &verification_message(code))
        .await?;
    Ok(response.accepted())
}

/// Send a temporary PIN message over WhatsApp.
pub async fn temporary_pin(
    to: &str,
    message: &str,
    deps: &ServiceDeps,
) -> Result<bool, EngagementError> {
    if message.is_empty() {
        return Err(EngagementError::validation("message is empty"));
    }
    let to = normalize_msisdn(to)?;
    let response = deps.twilio.send_whatsapp(&to, message).await?;
    Ok(response.accepted())
}

/// Record an inbound Twilio status callback (form-encoded key/value pairs).
pub async fn save_callback_response(
    form: HashMap<String, String>,
    deps: &ServiceDeps,
) -> Result<(), EngagementError> {
    let payload = serde_json::to_value(&form)
        .map_err(|err| EngagementError::validation(err.to_string()))?;
    MessageCallback::create("twilio", payload, &deps.pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_message_carries_the_code() {
        let message = verification_message("654321");
        assert!(message.contains("654321"));
        assert!(message.contains("60 minutes"));
    }
}
