//! Shared dependencies handed to domain actions.

use std::sync::Arc;

use africastalking::AfricasTalkingService;
use mailgun::MailgunService;
use sqlx::PgPool;
use twilio::TwilioService;

use crate::domains::messaging::EventPublisher;
use crate::domains::push::FcmClient;

/// Everything a domain action may need. Built once by the composition root
/// and shared via `Arc`.
#[derive(Clone)]
pub struct ServiceDeps {
    pub pool: PgPool,
    pub sms_gateway: Arc<AfricasTalkingService>,
    pub twilio: Arc<TwilioService>,
    pub mailgun: Arc<MailgunService>,
    pub fcm: Arc<FcmClient>,
    pub publisher: Arc<EventPublisher>,
}
