//! REST endpoints for email dispatch and the Mailgun delivery webhook.

use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};

use crate::common::EngagementError;
use crate::domains::mail::actions::{self as mail_actions, MailgunEvent};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct SendEmailPayload {
    pub subject: String,
    pub text: String,
    pub body: Option<String>,
    pub to: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SendEmailResponse {
    pub status: String,
    pub message_id: String,
}

/// Send an email to one or more recipients.
pub async fn send_email_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<SendEmailPayload>,
) -> Result<Json<SendEmailResponse>, EngagementError> {
    let (status, message_id) = mail_actions::send_email(
        &payload.subject,
        &payload.text,
        payload.body,
        &payload.to,
        &state.deps,
    )
    .await?;
    Ok(Json(SendEmailResponse { status, message_id }))
}

/// Mailgun delivery status webhook.
pub async fn mailgun_webhook_handler(
    Extension(state): Extension<AppState>,
    Json(event): Json<MailgunEvent>,
) -> Result<Json<serde_json::Value>, EngagementError> {
    mail_actions::update_delivery_status(event, &state.deps).await?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}
