//! GraphQL schema definition.

use super::context::GraphQLContext;
use juniper::{EmptySubscription, FieldError, FieldResult, RootNode};
use tracing::error;
use uuid::Uuid;

use crate::common::EngagementError;
use crate::domains::otp::actions as otp_actions;
use crate::domains::push::actions as push_actions;
use crate::domains::sms::actions as sms_actions;
use crate::domains::uploads::actions as upload_actions;
use crate::domains::uploads::{UploadData, UploadInput};

/// Per-recipient SMS dispatch status.
#[derive(Debug, Clone, juniper::GraphQLObject)]
pub struct SmsRecipientData {
    pub number: String,
    pub status: String,
    pub message_id: Option<String>,
    pub cost: Option<String>,
}

/// Result of an SMS send.
#[derive(Debug, Clone, juniper::GraphQLObject)]
pub struct SendMessageData {
    pub message: Option<String>,
    pub recipients: Vec<SmsRecipientData>,
}

impl From<africastalking::models::SendMessageResponse> for SendMessageData {
    fn from(response: africastalking::models::SendMessageResponse) -> Self {
        match response.sms_message_data {
            Some(data) => Self {
                message: data.message,
                recipients: data
                    .recipients
                    .into_iter()
                    .map(|r| SmsRecipientData {
                        number: r.number,
                        status: r.status,
                        message_id: r.message_id,
                        cost: r.cost,
                    })
                    .collect(),
            },
            None => Self {
                message: None,
                recipients: vec![],
            },
        }
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Convert an EngagementError to a juniper FieldError for thin resolvers.
fn to_field_error(e: EngagementError) -> FieldError {
    FieldError::new(e.to_string(), juniper::Value::null())
}

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    // =========================================================================
    // OTP Queries
    // =========================================================================

    /// Generate an OTP for a phone number and send it over the default SMS
    /// channel. Returns the code.
    async fn generate_otp(ctx: &GraphQLContext, msisdn: String) -> FieldResult<String> {
        otp_actions::generate_and_send_otp(&msisdn, &ctx.deps)
            .await
            .map_err(|e| {
                error!("Failed to generate and send OTP: {}", e);
                to_field_error(e)
            })
    }

    /// Generate one OTP and deliver it over both SMS and email.
    async fn generate_and_email_otp(
        ctx: &GraphQLContext,
        msisdn: String,
        email: String,
    ) -> FieldResult<String> {
        otp_actions::send_otp_to_email(&msisdn, &email, &ctx.deps)
            .await
            .map_err(to_field_error)
    }

    /// Generate a fallback OTP over an escalating channel:
    /// step 1 is WhatsApp, step 2 is Twilio SMS.
    async fn generate_retry_otp(
        ctx: &GraphQLContext,
        msisdn: String,
        retry_step: i32,
    ) -> FieldResult<String> {
        otp_actions::generate_retry_otp(&msisdn, retry_step, &ctx.deps)
            .await
            .map_err(to_field_error)
    }

    /// Generate an OTP for an email address and deliver it over email only.
    async fn email_verification_otp(ctx: &GraphQLContext, email: String) -> FieldResult<String> {
        otp_actions::email_verification_otp(&email, &ctx.deps)
            .await
            .map_err(to_field_error)
    }

    // =========================================================================
    // Upload Queries
    // =========================================================================

    /// Fetch a stored upload by id.
    async fn find_upload(ctx: &GraphQLContext, id: Uuid) -> FieldResult<UploadData> {
        upload_actions::find_upload_by_id(id, &ctx.deps)
            .await
            .map(UploadData::from)
            .map_err(to_field_error)
    }
}

pub struct Mutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl Mutation {
    // =========================================================================
    // OTP Mutations
    // =========================================================================

    /// Verify an OTP sent to a phone number. A match consumes the code.
    async fn verify_otp(ctx: &GraphQLContext, msisdn: String, otp: String) -> FieldResult<bool> {
        otp_actions::verify_otp(&msisdn, &otp, &ctx.deps)
            .await
            .map_err(to_field_error)
    }

    /// Verify an OTP sent to an email address.
    async fn verify_email_otp(
        ctx: &GraphQLContext,
        email: String,
        otp: String,
    ) -> FieldResult<bool> {
        otp_actions::verify_email_otp(&email, &otp, &ctx.deps)
            .await
            .map_err(to_field_error)
    }

    // =========================================================================
    // SMS Mutations
    // =========================================================================

    /// Send an SMS to a single recipient.
    async fn send(
        ctx: &GraphQLContext,
        to: String,
        message: String,
    ) -> FieldResult<SendMessageData> {
        sms_actions::send(&to, &message, &ctx.deps)
            .await
            .map(SendMessageData::from)
            .map_err(to_field_error)
    }

    // =========================================================================
    // Push Mutations
    // =========================================================================

    /// Send a push notification to the given registration tokens.
    async fn send_notification(
        ctx: &GraphQLContext,
        registration_tokens: Vec<String>,
        title: String,
        body: String,
    ) -> FieldResult<bool> {
        push_actions::send_notification(&registration_tokens, &title, &body, None, &ctx.deps)
            .await
            .map_err(to_field_error)
    }

    // =========================================================================
    // Upload Mutations
    // =========================================================================

    /// Store an upload and return the persisted record.
    async fn upload(ctx: &GraphQLContext, input: UploadInput) -> FieldResult<UploadData> {
        upload_actions::upload(input, &ctx.deps)
            .await
            .map(UploadData::from)
            .map_err(to_field_error)
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
