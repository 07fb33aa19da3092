//! Built-in HTML email templates.
//!
//! Bodies keep their `{token}` placeholders unless the render context maps
//! them to something else. The shared layout and the notification style
//! are derived from [`EmailConfig`].

use domain::rendering::{RenderError, TemplateRenderer};
use std::collections::HashMap;

use crate::config::EmailConfig;

const INVITATION: &str = r#"<h2 style="margin-top: 0;">You're invited</h2>
<p>Hi {user_name},</p>
<p>{inviter_name} invited you to join <strong>{tenant_name}</strong>.</p>
<p>Sign in with <code>{email}</code> and the temporary password <code>{temporary_password}</code>. You will be asked to choose a new password.</p>
<p class="cta"><a class="button" href="{accept_url}">Accept invitation</a></p>
<p class="muted">Or copy and paste this link into your browser:<br><a href="{accept_url}">{accept_url}</a></p>"#;

const PASSWORD_RESET: &str = r#"<h2 style="margin-top: 0;">Reset your password</h2>
<p>Hi {user_name},</p>
<p>We received a request to reset your password. Click the button below to choose a new one.</p>
<p class="cta"><a class="button" href="{reset_url}">Reset password</a></p>
<p class="muted">This link will expire in 1 hour. If you didn't request a password reset, you can safely ignore this email.</p>
<p class="muted">Or copy and paste this link into your browser:<br><a href="{reset_url}">{reset_url}</a></p>"#;

const USAGE_ALERT: &str = r#"<h2 style="margin-top: 0;">Usage alert for {tenant_name}</h2>
<p>Your {usage_type} usage has reached <strong>{percentage}%</strong> of the plan limit.</p>
<table class="usage">
  <tr><td>Used</td><td>{current_usage}</td></tr>
  <tr><td>Limit</td><td>{limit}</td></tr>
  <tr><td>Remaining</td><td>{remaining}</td></tr>
</table>
<p class="cta"><a class="button" href="{app_url}">Review usage</a></p>"#;

/// Renders the invitation, password reset and usage alert emails.
#[derive(Debug, Clone)]
pub struct HtmlEmailRenderer {
    product_name: String,
    accent_color: String,
}

impl HtmlEmailRenderer {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            product_name: config.product_name.clone(),
            accent_color: config.accent_color.clone(),
        }
    }

    fn body(template_name: &str) -> Option<&'static str> {
        match template_name {
            "invitation" => Some(INVITATION),
            "password_reset" => Some(PASSWORD_RESET),
            "usage_alert" => Some(USAGE_ALERT),
            _ => None,
        }
    }

    fn layout(&self, content: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<style>{style}</style>
</head>
<body>
<div class="header"><h1>{product}</h1></div>
<div class="content">
{content}
</div>
<div class="footer">{product}</div>
</body>
</html>"#,
            style = self.notification_style(),
            product = self.product_name,
            content = content,
        )
    }
}

impl TemplateRenderer for HtmlEmailRenderer {
    fn render(
        &self,
        template_name: &str,
        context: &HashMap<String, String>,
    ) -> Result<String, RenderError> {
        let body = Self::body(template_name)
            .ok_or_else(|| RenderError::UnknownTemplate(template_name.to_string()))?;
        Ok(self.layout(&shared::placeholders::substitute(body, context)))
    }

    fn notification_style(&self) -> String {
        format!(
            "body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px; }}\n\
             .header {{ background: {accent}; padding: 24px 30px; border-radius: 10px 10px 0 0; }}\n\
             .header h1 {{ color: #fff; margin: 0; font-size: 22px; }}\n\
             .content {{ background: #f9f9f9; padding: 30px; border-radius: 0 0 10px 10px; }}\n\
             .cta {{ text-align: center; margin: 30px 0; }}\n\
             .button {{ background: {accent}; color: #fff; padding: 14px 28px; text-decoration: none; border-radius: 6px; font-weight: bold; display: inline-block; }}\n\
             a {{ color: {accent}; }}\n\
             .muted {{ color: #666; font-size: 14px; }}\n\
             .footer {{ color: #999; font-size: 12px; text-align: center; margin-top: 20px; }}",
            accent = self.accent_color,
        )
    }
}
