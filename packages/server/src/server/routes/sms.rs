//! REST endpoints for bulk SMS and the gateway delivery callback.

use axum::extract::{Extension, Form, Json};
use serde::Deserialize;

use crate::common::EngagementError;
use crate::domains::sms::actions::{self as sms_actions, DeliveryReport};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct SendSmsPayload {
    pub message: String,
    pub to: Vec<String>,
}

/// Send one message to many recipients.
pub async fn send_sms_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<SendSmsPayload>,
) -> Result<Json<africastalking::models::SendMessageResponse>, EngagementError> {
    let response = sms_actions::send_to_many(&payload.message, &payload.to, &state.deps).await?;
    Ok(Json(response))
}

/// Delivery report callback from the SMS gateway (form-encoded).
pub async fn delivery_report_handler(
    Extension(state): Extension<AppState>,
    Form(report): Form<DeliveryReport>,
) -> Result<Json<serde_json::Value>, EngagementError> {
    sms_actions::save_delivery_report(report, &state.deps).await?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}
