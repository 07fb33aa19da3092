//! Shared seeds and renderer used by the service tests.

use crate::models::TemplateType;
use crate::rendering::StaticTemplateRenderer;
use crate::seeds::{ContentBlockSeed, NotificationTemplateSeed, StaticSeedSource};

pub const STYLE: &str = "body { font-family: sans-serif; }";

pub fn content_block_seeds() -> Vec<ContentBlockSeed> {
    vec![
        ContentBlockSeed {
            key: "terms_of_service".to_string(),
            category: "content".to_string(),
            title: "Terms of Service".to_string(),
            html_content: "# Terms of Service\n\nUse the product responsibly.".to_string(),
            description: Some("Public terms of service (Markdown)".to_string()),
            variables: vec![],
        },
        ContentBlockSeed {
            key: "signal_scoring_tour".to_string(),
            category: "product_tour".to_string(),
            title: "Signal scoring tour".to_string(),
            html_content: r##"{"steps": [{"target": "#score", "body": "Scores rank signals"}]}"##
                .to_string(),
            description: None,
            variables: vec![],
        },
        ContentBlockSeed {
            key: "dashboard_welcome".to_string(),
            category: "content".to_string(),
            title: "Dashboard welcome".to_string(),
            html_content: "<p>Welcome back, {user_name}.</p>".to_string(),
            description: None,
            variables: vec!["user_name".to_string()],
        },
    ]
}

pub fn notification_template_seeds() -> Vec<NotificationTemplateSeed> {
    vec![
        NotificationTemplateSeed {
            name: "daily_digest_email".to_string(),
            template_type: TemplateType::Email,
            category: "digest".to_string(),
            subject_template: Some("Your daily digest: {count} new items".to_string()),
            body_template: "Hi {user_name}, you have {count} new items.".to_string(),
            variables: vec!["user_name".to_string(), "count".to_string()],
            is_active: true,
            is_default: true,
        },
        NotificationTemplateSeed {
            name: "high_value_slack".to_string(),
            template_type: TemplateType::Slack,
            category: "alert".to_string(),
            subject_template: None,
            body_template: ":rotating_light: High value signal: {title}".to_string(),
            variables: vec!["title".to_string()],
            is_active: true,
            is_default: true,
        },
    ]
}

pub fn styled_digest(title: &str) -> String {
    format!(
        "<html><head><style>__STYLE__</style></head><body><h1>{}</h1><p>Hi {{user_name}}</p>{{assignments_html}}</body></html>",
        title
    )
}

pub fn seed_source() -> StaticSeedSource {
    let mut source = StaticSeedSource::new()
        .with_styled_template("daily_digest", styled_digest("Daily digest"))
        .with_styled_template("weekly_digest", styled_digest("Weekly digest"));
    for seed in content_block_seeds() {
        source = source.with_content_block(seed);
    }
    for seed in notification_template_seeds() {
        source = source.with_notification_template(seed);
    }
    source
}

pub fn renderer() -> StaticTemplateRenderer {
    StaticTemplateRenderer::new(STYLE)
        .with_template(
            "invitation",
            "<p>Hi {user_name}, {inviter_name} invited you to {tenant_name}.</p>\
             <p><a href=\"{accept_url}\">Accept</a> ({email} / {temporary_password})</p>",
        )
        .with_template(
            "password_reset",
            "<p>Hi {user_name}, <a href=\"{reset_url}\">reset your password</a>.</p>",
        )
        .with_template(
            "usage_alert",
            "<p>{tenant_name}: {usage_type} at {percentage}% ({current_usage}/{limit}, {remaining} left). {app_url}</p>",
        )
}
