mod otp_code;

pub use otp_code::OtpCode;
