//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Extension, Request},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use africastalking::{AfricasTalkingOptions, AfricasTalkingService};
use mailgun::{MailgunOptions, MailgunService};
use twilio::{TwilioOptions, TwilioService};

use crate::common::{NatsPublisher, ServiceDeps};
use crate::config::Config;
use crate::domains::messaging::EventPublisher;
use crate::domains::push::FcmClient;
use crate::server::graphql::{create_schema, GraphQLContext};
use crate::server::routes::{
    graphql::{graphql_handler, graphql_playground},
    health::health_handler,
    mail::{mailgun_webhook_handler, send_email_handler},
    otp::{
        send_email_otp_handler, send_otp_handler, send_otp_to_email_handler,
        send_retry_otp_handler, verify_email_otp_handler, verify_otp_handler,
    },
    push::send_notification_handler,
    sms::{delivery_report_handler, send_sms_handler},
    uploads::{find_upload_handler, upload_handler},
    whatsapp::{
        send_temporary_pin_handler, twilio_notification_handler, verify_phonenumber_handler,
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServiceDeps>,
}

/// Middleware to create GraphQLContext per-request
async fn create_graphql_context(
    Extension(state): Extension<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let context = GraphQLContext::new(state.deps.clone());
    request.extensions_mut().insert(context);
    next.run(request).await
}

/// Build the service dependencies from configuration.
///
/// Provider clients are constructed here, once, with their settings injected
/// as plain values. The pub/sub topics are provisioned idempotently before
/// the router starts taking traffic.
pub async fn build_deps(
    pool: PgPool,
    nats: Arc<dyn NatsPublisher>,
    config: &Config,
) -> Result<Arc<ServiceDeps>> {
    let sms_gateway = Arc::new(AfricasTalkingService::new(AfricasTalkingOptions {
        username: config.ait_username.clone(),
        api_key: config.ait_api_key.clone(),
        sender_id: config.ait_sender_id.clone(),
        environment: config.environment.clone(),
    }));

    let twilio = Arc::new(TwilioService::new(TwilioOptions {
        account_sid: config.twilio_account_sid.clone(),
        auth_token: config.twilio_auth_token.clone(),
        whatsapp_sender: config.twilio_whatsapp_sender.clone(),
        sms_sender: config.twilio_sms_sender.clone(),
    }));

    let mailgun = Arc::new(MailgunService::new(MailgunOptions {
        api_key: config.mailgun_api_key.clone(),
        domain: config.mailgun_domain.clone(),
        from: config.mailgun_from.clone(),
    }));

    let fcm = Arc::new(FcmClient::new(config.fcm_server_key.clone()));

    let publisher = Arc::new(EventPublisher::new(nats, config.environment.clone()));
    publisher
        .ensure_topics()
        .await
        .context("Failed to provision pub/sub topics")?;

    Ok(Arc::new(ServiceDeps {
        pool,
        sms_gateway,
        twilio,
        mailgun,
        fcm,
        publisher,
    }))
}

/// Build the Axum application router
pub async fn build_app(
    pool: PgPool,
    nats: Arc<dyn NatsPublisher>,
    config: &Config,
) -> Result<Router> {
    let deps = build_deps(pool, nats, config).await?;
    let schema = Arc::new(create_schema());
    let app_state = AppState { deps };

    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Build router
    let mut router = Router::new().route("/graphql", post(graphql_handler));

    // GraphQL playground only in debug builds (development)
    #[cfg(debug_assertions)]
    {
        router = router.route("/graphql", get(graphql_playground));
    }

    let app = router
        // Health check
        .route("/health", get(health_handler))
        // OTP issuance and verification
        .route("/send_otp", post(send_otp_handler))
        .route("/send_retry_otp", post(send_retry_otp_handler))
        .route("/send_otp_to_email", post(send_otp_to_email_handler))
        .route("/send_email_otp", post(send_email_otp_handler))
        .route("/verify_otp", post(verify_otp_handler))
        .route("/verify_email_otp", post(verify_email_otp_handler))
        // SMS
        .route("/send_sms", post(send_sms_handler))
        .route("/ait_delivery_report", post(delivery_report_handler))
        // WhatsApp
        .route("/verify_phonenumber", post(verify_phonenumber_handler))
        .route("/send_temporary_pin", post(send_temporary_pin_handler))
        .route("/twilio_notification", post(twilio_notification_handler))
        // Email
        .route("/internal/send_email", post(send_email_handler))
        .route("/mailgun_delivery_webhook", post(mailgun_webhook_handler))
        // Push
        .route("/send_notification", post(send_notification_handler))
        // Uploads
        .route("/internal/upload", post(upload_handler))
        .route("/internal/upload/:upload_id", get(find_upload_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(create_graphql_context))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State (schema for the GraphQL handler)
        .with_state(schema);

    Ok(app)
}
