//! Pub/sub notification fan-out.
//!
//! Events are wrapped in a `NotificationEnvelope`, serialized to JSON and
//! published to a namespaced NATS subject. The topic registry is fixed at
//! construction; publishing to an unregistered topic is a validation error.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;

use crate::common::{EngagementError, NatsPublisher};

use super::envelope::{Flavour, NotificationEnvelope};

pub const SMS_SENT_TOPIC: &str = "sms.sent";
pub const EMAIL_SENT_TOPIC: &str = "email.sent";
pub const OTP_SENT_TOPIC: &str = "otp.sent";
pub const PUSH_SENT_TOPIC: &str = "push.sent";
pub const UPLOAD_CREATED_TOPIC: &str = "upload.created";

const TOPIC_IDS: [&str; 5] = [
    SMS_SENT_TOPIC,
    EMAIL_SENT_TOPIC,
    OTP_SENT_TOPIC,
    PUSH_SENT_TOPIC,
    UPLOAD_CREATED_TOPIC,
];

const SUBJECT_PREFIX: &str = "engagement";

pub struct EventPublisher {
    nats: Arc<dyn NatsPublisher>,
    environment: String,
}

impl EventPublisher {
    pub fn new(nats: Arc<dyn NatsPublisher>, environment: impl Into<String>) -> Self {
        Self {
            nats,
            environment: environment.into(),
        }
    }

    /// The registered topic IDs.
    pub fn topic_ids(&self) -> &'static [&'static str] {
        &TOPIC_IDS
    }

    /// Full subject for a topic: `engagement.{environment}.{topic}`.
    pub fn subject(&self, topic: &str) -> String {
        format!("{}.{}.{}", SUBJECT_PREFIX, self.environment, topic)
    }

    fn stream_name(&self) -> String {
        format!("{}-{}", SUBJECT_PREFIX, self.environment)
    }

    /// Idempotently provision the stream covering every registered topic.
    /// Called once at startup.
    pub async fn ensure_topics(&self) -> Result<(), EngagementError> {
        let subjects = TOPIC_IDS.iter().map(|t| self.subject(t)).collect();
        self.nats
            .ensure_subjects(self.stream_name(), subjects)
            .await
            .map_err(|err| EngagementError::Provider(err.to_string()))
    }

    /// Publish a notification envelope to a registered topic.
    pub async fn notify(
        &self,
        topic: &str,
        uid: &str,
        flavour: Flavour,
        payload: serde_json::Value,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Result<(), EngagementError> {
        if !TOPIC_IDS.contains(&topic) {
            return Err(EngagementError::validation(format!(
                "unknown topic: {}",
                topic
            )));
        }

        let envelope = NotificationEnvelope {
            uid: uid.to_string(),
            flavour,
            payload,
            metadata,
        };
        let encoded = serde_json::to_vec(&envelope)
            .map_err(|err| EngagementError::validation(err.to_string()))?;

        self.nats
            .publish(self.subject(topic), Bytes::from(encoded))
            .await
            .map_err(|err| EngagementError::Provider(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::TestNats;
    use serde_json::json;

    fn publisher_with_test_nats() -> (EventPublisher, Arc<TestNats>) {
        let nats = Arc::new(TestNats::new());
        let publisher = EventPublisher::new(nats.clone(), "staging");
        (publisher, nats)
    }

    #[test]
    fn subjects_are_namespaced_by_environment() {
        let (publisher, _) = publisher_with_test_nats();
        assert_eq!(publisher.subject("sms.sent"), "engagement.staging.sms.sent");
    }

    #[tokio::test]
    async fn notify_publishes_an_envelope() {
        let (publisher, nats) = publisher_with_test_nats();

        publisher
            .notify(
                SMS_SENT_TOPIC,
                "+254711223344",
                Flavour::Consumer,
                json!({ "message_id": "ATXid_abc" }),
                HashMap::new(),
            )
            .await
            .unwrap();

        let published = nats.published_to("engagement.staging.sms.sent");
        assert_eq!(published.len(), 1);

        let envelope: NotificationEnvelope =
            serde_json::from_slice(&published[0].payload).unwrap();
        assert_eq!(envelope.uid, "+254711223344");
        assert_eq!(envelope.flavour, Flavour::Consumer);
        assert_eq!(envelope.payload["message_id"], "ATXid_abc");
    }

    #[tokio::test]
    async fn notify_rejects_unregistered_topics() {
        let (publisher, nats) = publisher_with_test_nats();

        let err = publisher
            .notify(
                "nonsense.topic",
                "uid",
                Flavour::Pro,
                json!({}),
                HashMap::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, EngagementError::Validation(_)));
        assert!(nats.published().is_empty());
    }

    #[tokio::test]
    async fn ensure_topics_provisions_every_subject() {
        let (publisher, nats) = publisher_with_test_nats();
        publisher.ensure_topics().await.unwrap();

        let streams = nats.streams();
        assert_eq!(streams.len(), 1);
        let (name, subjects) = &streams[0];
        assert_eq!(name, "engagement-staging");
        assert_eq!(subjects.len(), TOPIC_IDS.len());
        assert!(subjects.contains(&"engagement.staging.otp.sent".to_string()));
    }
}
