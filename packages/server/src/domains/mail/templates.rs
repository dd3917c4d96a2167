//! Static HTML email templates.

/// HTML body for an OTP email.
pub fn otp_email(code: &str) -> String {
    format!(
        r#"<html>
<body style="font-family: sans-serif; color: #222;">
  <p>Hello,</p>
  <p>Your verification code is:</p>
  <p style="font-size: 28px; font-weight: bold; letter-spacing: 4px;">{code}</p>
  <p>The code is valid for the next 60 minutes. If you did not request it,
  you can safely ignore this email.</p>
</body>
</html>"#
    )
}

/// HTML body for a generic notification email.
pub fn notification_email(title: &str, body: &str) -> String {
    format!(
        r#"<html>
<body style="font-family: sans-serif; color: #222;">
  <h2>{title}</h2>
  <p>{body}</p>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_email_embeds_the_code() {
        let html = otp_email("123456");
        assert!(html.contains("123456"));
        assert!(html.contains("60 minutes"));
    }

    #[test]
    fn notification_email_embeds_title_and_body() {
        let html = notification_email("Welcome", "Glad to have you.");
        assert!(html.contains("<h2>Welcome</h2>"));
        assert!(html.contains("Glad to have you."));
    }
}
