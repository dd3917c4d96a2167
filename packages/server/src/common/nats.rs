//! NATS client abstraction for production and testing.
//!
//! Publishing goes through the `NatsPublisher` trait so the pub/sub fan-out
//! can be exercised in tests without a broker: `TestNats` records published
//! messages and provisioned subjects for inspection.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::RwLock;

/// A published message.
#[derive(Debug, Clone)]
pub struct PublishedMessage {
    pub subject: String,
    pub payload: Bytes,
}

/// Trait for NATS publish operations.
#[async_trait]
pub trait NatsPublisher: Send + Sync {
    /// Publish a message to a subject.
    async fn publish(&self, subject: String, payload: Bytes) -> Result<()>;

    /// Idempotently provision a stream covering the given subjects.
    async fn ensure_subjects(&self, stream: String, subjects: Vec<String>) -> Result<()>;
}

/// Real NATS client publisher.
pub struct NatsClientPublisher {
    client: async_nats::Client,
}

impl NatsClientPublisher {
    pub fn new(client: async_nats::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NatsPublisher for NatsClientPublisher {
    async fn publish(&self, subject: String, payload: Bytes) -> Result<()> {
        self.client.publish(subject, payload).await?;
        Ok(())
    }

    async fn ensure_subjects(&self, stream: String, subjects: Vec<String>) -> Result<()> {
        let jetstream = async_nats::jetstream::new(self.client.clone());
        jetstream
            .get_or_create_stream(async_nats::jetstream::stream::Config {
                name: stream,
                subjects,
                ..Default::default()
            })
            .await?;
        Ok(())
    }
}

/// Mock NATS client that tracks published messages for testing.
#[derive(Default)]
pub struct TestNats {
    published: RwLock<Vec<PublishedMessage>>,
    streams: RwLock<Vec<(String, Vec<String>)>>,
}

impl TestNats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages published so far.
    pub fn published(&self) -> Vec<PublishedMessage> {
        self.published
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Messages published to a specific subject.
    pub fn published_to(&self, subject: &str) -> Vec<PublishedMessage> {
        self.published()
            .into_iter()
            .filter(|m| m.subject == subject)
            .collect()
    }

    /// Streams provisioned via `ensure_subjects`.
    pub fn streams(&self) -> Vec<(String, Vec<String>)> {
        self.streams
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl NatsPublisher for TestNats {
    async fn publish(&self, subject: String, payload: Bytes) -> Result<()> {
        self.published
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(PublishedMessage { subject, payload });
        Ok(())
    }

    async fn ensure_subjects(&self, stream: String, subjects: Vec<String>) -> Result<()> {
        self.streams
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push((stream, subjects));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_nats_records_publishes() {
        let nats = TestNats::new();
        nats.publish("a.b".to_string(), Bytes::from_static(b"hi"))
            .await
            .unwrap();

        let published = nats.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].subject, "a.b");
        assert_eq!(published[0].payload.as_ref(), b"hi");
        assert!(nats.published_to("other").is_empty());
    }

    #[tokio::test]
    async fn test_nats_records_streams() {
        let nats = TestNats::new();
        nats.ensure_subjects("s".to_string(), vec!["s.>".to_string()])
            .await
            .unwrap();
        assert_eq!(nats.streams(), vec![("s".to_string(), vec!["s.>".to_string()])]);
    }
}
