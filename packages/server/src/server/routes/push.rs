//! REST endpoint for push notifications.

use axum::{extract::Extension, Json};
use serde::Deserialize;

use crate::common::EngagementError;
use crate::domains::push::actions as push_actions;
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct SendNotificationPayload {
    #[serde(rename = "registrationTokens")]
    pub registration_tokens: Vec<String>,
    pub title: String,
    pub body: String,
    pub data: Option<serde_json::Value>,
}

/// Send a data notification to the specified registration tokens.
pub async fn send_notification_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<SendNotificationPayload>,
) -> Result<Json<serde_json::Value>, EngagementError> {
    push_actions::send_notification(
        &payload.registration_tokens,
        &payload.title,
        &payload.body,
        payload.data,
        &state.deps,
    )
    .await?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}
