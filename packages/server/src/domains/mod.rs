pub mod mail;
pub mod messaging;
pub mod otp;
pub mod push;
pub mod sms;
pub mod uploads;
pub mod whatsapp;
