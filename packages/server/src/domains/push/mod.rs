pub mod actions;
pub mod fcm;

pub use fcm::FcmClient;
