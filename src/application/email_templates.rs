//! E-mail bodies rendered by application handlers.

use crate::ports::EmailMessage;

/// Minimal HTML escaping for values interpolated into templates.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Password reset e-mail carrying the one-time link.
pub fn password_reset(to: &str, first_name: &str, link: &str, valid_minutes: u64) -> EmailMessage {
    let name = escape(first_name);
    let href = escape(link);
    let html = format!(
        "<!DOCTYPE html>\
<html><body style=\"font-family:sans-serif;color:#1f2937\">\
<h2>Reset your Dolphin Streak password</h2>\
<p>Hi {name},</p>\
<p>We received a request to reset your password. Click the button below to choose a new one. \
The link is valid for {valid_minutes} minutes.</p>\
<p><a href=\"{href}\" style=\"display:inline-block;padding:10px 18px;background:#0ea5e9;\
color:#fff;border-radius:6px;text-decoration:none\">Reset password</a></p>\
<p>If the button does not work, copy this link into your browser:<br>{href}</p>\
<p>If you did not ask for a reset you can ignore this e-mail.</p>\
</body></html>"
    );
    let text = format!(
        "Hi {first_name},\n\n\
We received a request to reset your Dolphin Streak password.\n\
Open this link within {valid_minutes} minutes to choose a new one:\n\n\
{link}\n\n\
If you did not ask for a reset you can ignore this e-mail.\n"
    );

    EmailMessage {
        to: to.to_string(),
        subject: "Reset your Dolphin Streak password".to_string(),
        html,
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_email_contains_link_and_lifetime() {
        let link = "https://app.example.com/auth/change-password/abc?iv=def";
        let message = password_reset("ana@example.com", "Ana", link, 60);

        assert_eq!(message.to, "ana@example.com");
        assert!(message.text.contains(link));
        assert!(message.text.contains("60 minutes"));
        assert!(message.html.contains("Hi Ana"));
    }

    #[test]
    fn names_are_escaped_in_html() {
        let message = password_reset("a@example.com", "<script>", "https://x.test/?a=1&b=2", 60);
        assert!(!message.html.contains("<script>"));
        assert!(message.html.contains("a=1&amp;b=2"));
    }
}
