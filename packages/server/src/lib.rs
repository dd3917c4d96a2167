// Engagement & Notifications Backend - API Core
//
// This crate provides thin service wrappers over delivery providers (SMS,
// WhatsApp, email, push) plus OTP issuance/verification, exposed over
// GraphQL and REST with Postgres persistence and NATS event fan-out.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
