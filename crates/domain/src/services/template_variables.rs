//! Registry of placeholder names recognised per template category.
//!
//! Advisory only: stored `variables` lists are never checked against it.

use std::collections::BTreeMap;

const REGISTRY: &[(&str, &[&str])] = &[
    (
        "invitation",
        &[
            "user_name",
            "inviter_name",
            "tenant_name",
            "accept_url",
            "temporary_password",
            "email",
        ],
    ),
    ("daily_digest", &["user_name", "count", "app_url", "assignments"]),
    (
        "usage_alert",
        &[
            "tenant_name",
            "usage_type",
            "percentage",
            "current_usage",
            "limit",
            "remaining",
            "app_url",
        ],
    ),
    ("password_reset", &["user_name", "reset_url"]),
    (
        "notification_generic",
        &[
            "recipient_name",
            "notification_title",
            "notification_message",
            "action_url",
            "action_text",
            "sender_name",
            "current_year",
        ],
    ),
];

/// Returns every known category with its placeholder names.
pub fn supported_variables() -> BTreeMap<&'static str, &'static [&'static str]> {
    REGISTRY.iter().copied().collect()
}

/// Placeholders referenced in `body` that are missing from `declared`.
pub fn undeclared_placeholders(body: &str, declared: &[String]) -> Vec<String> {
    shared::placeholders::extract_placeholders(body)
        .into_iter()
        .filter(|name| !declared.iter().any(|d| d == name))
        .collect()
}
