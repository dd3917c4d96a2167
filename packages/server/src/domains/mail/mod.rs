pub mod actions;
pub mod models;
pub mod templates;

pub use models::EmailLog;
