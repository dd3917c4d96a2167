//! REST endpoints for WhatsApp sends and Twilio callbacks.

use std::collections::HashMap;

use axum::extract::{Extension, Form, Json};
use serde::{Deserialize, Serialize};

use crate::common::EngagementError;
use crate::domains::whatsapp::actions as whatsapp_actions;
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct VerifyPhonePayload {
    pub to: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct TemporaryPinPayload {
    pub to: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: bool,
}

/// Send a phone number verification code over WhatsApp.
pub async fn verify_phonenumber_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<VerifyPhonePayload>,
) -> Result<Json<StatusResponse>, EngagementError> {
    let status =
        whatsapp_actions::phone_number_verification_code(&payload.to, &payload.code, &state.deps)
            .await?;
    Ok(Json(StatusResponse { status }))
}

/// Send a temporary PIN message over WhatsApp.
pub async fn send_temporary_pin_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<TemporaryPinPayload>,
) -> Result<Json<StatusResponse>, EngagementError> {
    let status =
        whatsapp_actions::temporary_pin(&payload.to, &payload.message, &state.deps).await?;
    Ok(Json(StatusResponse { status }))
}

/// Twilio message status callback (form-encoded).
pub async fn twilio_notification_handler(
    Extension(state): Extension<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, EngagementError> {
    whatsapp_actions::save_callback_response(form, &state.deps).await?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}
