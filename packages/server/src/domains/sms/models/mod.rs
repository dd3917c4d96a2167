mod sms_log;

pub use sms_log::SmsLog;
