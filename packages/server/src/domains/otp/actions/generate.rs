//! OTP issuance: code generation and channel dispatch.

use rand::Rng;
use serde_json::json;
use tracing::warn;

use crate::common::{normalize_msisdn, validate_email, EngagementError, ServiceDeps};
use crate::domains::mail;
use crate::domains::messaging::{Flavour, OTP_SENT_TOPIC};
use crate::domains::otp::OtpCode;
use crate::domains::sms;
use crate::domains::whatsapp;

pub const OTP_CODE_LENGTH: usize = 6;

/// Retry steps select an escalating delivery channel. This is an ordinal
/// lookup, not a backoff policy.
const RETRY_STEP_WHATSAPP: i32 = 1;
const RETRY_STEP_TWILIO_SMS: i32 = 2;

/// Produce a zero-padded numeric code. This is a usability code, not a
/// security token, so the thread RNG is good enough.
pub fn generate_code() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{:0width$}", n, width = OTP_CODE_LENGTH)
}

/// The user-facing message carrying a code.
pub fn otp_message(code: &str) -> String {
    format!(
        "{} is your verification code. It is valid for the next 60 minutes.",
        code
    )
}

async fn publish_otp_sent(identifier: &str, channel: &str, deps: &ServiceDeps) {
    let result = deps
        .publisher
        .notify(
            OTP_SENT_TOPIC,
            identifier,
            Flavour::Consumer,
            json!({ "identifier": identifier, "channel": channel }),
            Default::default(),
        )
        .await;
    if let Err(err) = result {
        // The code was already delivered; a lost event must not fail the call.
        warn!(error = %err, identifier, "failed to publish otp.sent event");
    }
}

/// Generate a code for a phone number, store it and deliver it over the
/// default channel (Africa's Talking SMS). Returns the code.
pub async fn generate_and_send_otp(
    msisdn: &str,
    deps: &ServiceDeps,
) -> Result<String, EngagementError> {
    let msisdn = normalize_msisdn(msisdn)?;
    let code = generate_code();

    OtpCode::save(&msisdn, &code, &deps.pool).await?;
    sms::actions::send(&msisdn, &otp_message(&code), deps).await?;
    publish_otp_sent(&msisdn, "sms", deps).await;

    Ok(code)
}

/// Generate a fallback code when the default channel did not reach the user.
/// Step 1 goes out over WhatsApp, step 2 over Twilio SMS.
pub async fn generate_retry_otp(
    msisdn: &str,
    retry_step: i32,
    deps: &ServiceDeps,
) -> Result<String, EngagementError> {
    let msisdn = normalize_msisdn(msisdn)?;
    let code = generate_code();

    OtpCode::save(&msisdn, &code, &deps.pool).await?;

    match retry_step {
        RETRY_STEP_WHATSAPP => {
            whatsapp::actions::phone_number_verification_code(&msisdn, &code, deps).await?;
            publish_otp_sent(&msisdn, "whatsapp", deps).await;
        }
        RETRY_STEP_TWILIO_SMS => {
            deps.twilio.send_sms(&msisdn, &otp_message(&code)).await?;
            publish_otp_sent(&msisdn, "twilio_sms", deps).await;
        }
        step => {
            return Err(EngagementError::validation(format!(
                "unknown retry step: {}",
                step
            )))
        }
    }

    Ok(code)
}

/// Generate one code for a phone number and deliver it over both SMS and
/// email. The record is stored under the phone identifier.
pub async fn send_otp_to_email(
    msisdn: &str,
    email: &str,
    deps: &ServiceDeps,
) -> Result<String, EngagementError> {
    let msisdn = normalize_msisdn(msisdn)?;
    let email = validate_email(email)?;
    let code = generate_code();

    OtpCode::save(&msisdn, &code, &deps.pool).await?;
    sms::actions::send(&msisdn, &otp_message(&code), deps).await?;

    let html = mail::templates::otp_email(&code);
    mail::actions::send_email(
        "Your verification code",
        &otp_message(&code),
        Some(html),
        &[email],
        deps,
    )
    .await?;
    publish_otp_sent(&msisdn, "sms+email", deps).await;

    Ok(code)
}

/// Generate a code for an email address and deliver it over email only.
/// The record is stored under the lowercased email.
pub async fn email_verification_otp(
    email: &str,
    deps: &ServiceDeps,
) -> Result<String, EngagementError> {
    let email = validate_email(email)?;
    let code = generate_code();

    OtpCode::save(&email, &code, &deps.pool).await?;

    let html = mail::templates::otp_email(&code);
    mail::actions::send_email(
        "Your verification code",
        &otp_message(&code),
        Some(html),
        &[email.clone()],
        deps,
    )
    .await?;
    publish_otp_sent(&email, "email", deps).await;

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_have_fixed_length() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), OTP_CODE_LENGTH);
            assert!(
                code.chars().all(|c| c.is_ascii_digit()),
                "code {} contains non-digits",
                code
            );
        }
    }

    #[test]
    fn small_values_are_zero_padded() {
        // Not statistical: just check the formatter directly.
        let padded = format!("{:0width$}", 42u32, width = OTP_CODE_LENGTH);
        assert_eq!(padded, "000042");
    }

    #[test]
    fn message_contains_code_and_validity_window() {
        let message = otp_message("123456");
        assert!(message.contains("123456"));
        assert!(message.contains("60 minutes"));
    }
}
