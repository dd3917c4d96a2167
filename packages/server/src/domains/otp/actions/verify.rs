//! OTP verification.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use crate::common::{normalize_msisdn, validate_email, EngagementError, ServiceDeps};
use crate::domains::otp::OtpCode;

/// Codes older than this no longer verify. The window matches the
/// user-facing message copy.
pub const OTP_VALIDITY_MINUTES: i64 = 60;

/// Verify a code sent to a phone number.
pub async fn verify_otp(
    msisdn: &str,
    supplied_code: &str,
    deps: &ServiceDeps,
) -> Result<bool, EngagementError> {
    let msisdn = normalize_msisdn(msisdn)?;
    verify_identifier(&msisdn, supplied_code, &deps.pool).await
}

/// Verify a code sent to an email address.
pub async fn verify_email_otp(
    email: &str,
    supplied_code: &str,
    deps: &ServiceDeps,
) -> Result<bool, EngagementError> {
    let email = validate_email(email)?;
    verify_identifier(&email, supplied_code, &deps.pool).await
}

/// Core check: the identifier's single stored record must exist, be
/// unconsumed, be fresh, and carry the supplied code. A match consumes the
/// record; a mismatch leaves it valid. A missing record is an error so an
/// unknown identifier can never verify.
async fn verify_identifier(
    identifier: &str,
    supplied_code: &str,
    pool: &PgPool,
) -> Result<bool, EngagementError> {
    let record = OtpCode::find_latest(identifier, pool)
        .await?
        .ok_or_else(|| EngagementError::not_found(format!("OTP for {}", identifier)))?;

    if !record.is_valid {
        return Ok(false);
    }

    if Utc::now() - record.created_at > Duration::minutes(OTP_VALIDITY_MINUTES) {
        return Ok(false);
    }

    if record.code != supplied_code {
        return Ok(false);
    }

    OtpCode::invalidate(identifier, pool).await?;
    Ok(true)
}
