pub mod graphql;
pub mod health;
pub mod mail;
pub mod otp;
pub mod push;
pub mod sms;
pub mod uploads;
pub mod whatsapp;
