use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Error taxonomy for the engagement services.
///
/// Validation and not-found errors map to HTTP 400, everything else to 500.
/// Errors are wrapped with context and returned to callers; nothing is
/// retried automatically.
#[derive(Debug, Error)]
pub enum EngagementError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl EngagementError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}

impl From<twilio::TwilioError> for EngagementError {
    fn from(err: twilio::TwilioError) -> Self {
        Self::Provider(err.to_string())
    }
}

impl From<africastalking::AfricasTalkingError> for EngagementError {
    fn from(err: africastalking::AfricasTalkingError) -> Self {
        Self::Provider(err.to_string())
    }
}

impl From<mailgun::MailgunError> for EngagementError {
    fn from(err: mailgun::MailgunError) -> Self {
        Self::Provider(err.to_string())
    }
}

impl IntoResponse for EngagementError {
    fn into_response(self) -> Response {
        let status = match self {
            EngagementError::Validation(_) | EngagementError::NotFound(_) => {
                StatusCode::BAD_REQUEST
            }
            EngagementError::Provider(_) | EngagementError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_bad_requests() {
        let response = EngagementError::validation("invalid phone number").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_errors_are_bad_requests() {
        let response = EngagementError::not_found("OTP for +254711223344").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn provider_errors_are_internal() {
        let response = EngagementError::Provider("twilio down".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_message_names_the_subject() {
        let err = EngagementError::not_found("OTP for +254711223344");
        assert_eq!(err.to_string(), "OTP for +254711223344 not found");
    }
}
