//! REST endpoints for OTP issuance and verification.

use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};

use crate::common::EngagementError;
use crate::domains::otp::actions as otp_actions;
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct SendOtpPayload {
    pub msisdn: String,
}

#[derive(Debug, Deserialize)]
pub struct SendRetryOtpPayload {
    pub msisdn: String,
    #[serde(rename = "retryStep")]
    pub retry_step: i32,
}

#[derive(Debug, Deserialize)]
pub struct SendEmailOtpPayload {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct SendOtpToEmailPayload {
    pub msisdn: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpPayload {
    pub msisdn: String,
    #[serde(rename = "verificationCode")]
    pub verification_code: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailOtpPayload {
    pub email: String,
    #[serde(rename = "verificationCode")]
    pub verification_code: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyOtpResponse {
    #[serde(rename = "IsVerified")]
    pub is_verified: bool,
}

/// Generate and send an OTP to a phone number. Responds with the code.
pub async fn send_otp_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<SendOtpPayload>,
) -> Result<Json<String>, EngagementError> {
    let code = otp_actions::generate_and_send_otp(&payload.msisdn, &state.deps).await?;
    Ok(Json(code))
}

/// Generate a fallback OTP over an escalating channel.
pub async fn send_retry_otp_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<SendRetryOtpPayload>,
) -> Result<Json<String>, EngagementError> {
    let code =
        otp_actions::generate_retry_otp(&payload.msisdn, payload.retry_step, &state.deps).await?;
    Ok(Json(code))
}

/// Generate one OTP and deliver it over both SMS and email.
pub async fn send_otp_to_email_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<SendOtpToEmailPayload>,
) -> Result<Json<String>, EngagementError> {
    let code =
        otp_actions::send_otp_to_email(&payload.msisdn, &payload.email, &state.deps).await?;
    Ok(Json(code))
}

/// Generate and email an OTP for an email address.
pub async fn send_email_otp_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<SendEmailOtpPayload>,
) -> Result<Json<String>, EngagementError> {
    let code = otp_actions::email_verification_otp(&payload.email, &state.deps).await?;
    Ok(Json(code))
}

/// Verify an OTP sent to a phone number.
pub async fn verify_otp_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<VerifyOtpPayload>,
) -> Result<Json<VerifyOtpResponse>, EngagementError> {
    let is_verified =
        otp_actions::verify_otp(&payload.msisdn, &payload.verification_code, &state.deps).await?;
    Ok(Json(VerifyOtpResponse { is_verified }))
}

/// Verify an OTP sent to an email address.
pub async fn verify_email_otp_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<VerifyEmailOtpPayload>,
) -> Result<Json<VerifyOtpResponse>, EngagementError> {
    let is_verified =
        otp_actions::verify_email_otp(&payload.email, &payload.verification_code, &state.deps)
            .await?;
    Ok(Json(VerifyOtpResponse { is_verified }))
}
