pub mod envelope;
pub mod publisher;

pub use envelope::{Flavour, NotificationEnvelope};
pub use publisher::{
    EventPublisher, EMAIL_SENT_TOPIC, OTP_SENT_TOPIC, PUSH_SENT_TOPIC, SMS_SENT_TOPIC,
    UPLOAD_CREATED_TOPIC,
};
