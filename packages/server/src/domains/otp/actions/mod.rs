mod generate;
mod verify;

pub use generate::{
    email_verification_otp, generate_and_send_otp, generate_code, generate_retry_otp,
    otp_message, send_otp_to_email, OTP_CODE_LENGTH,
};
pub use verify::{verify_email_otp, verify_otp, OTP_VALIDITY_MINUTES};
