pub mod callback;
pub mod deps;
pub mod error;
pub mod nats;
pub mod phone;

pub use callback::MessageCallback;
pub use deps::ServiceDeps;
pub use error::EngagementError;
pub use nats::{NatsClientPublisher, NatsPublisher, TestNats};
pub use phone::{normalize_msisdn, validate_email};
