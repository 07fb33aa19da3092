//! Notification templates delivered over email or Slack.
//!
//! Uniqueness is on the pair `(name, template_type)`: the same logical name
//! may exist once per channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::patch::double_option;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::error::ValidationError;

/// Delivery channel of a notification template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    Email,
    Slack,
}

impl TemplateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::Email => "email",
            TemplateType::Slack => "slack",
        }
    }

    /// Email templates carry a subject line; Slack messages do not.
    pub fn requires_subject(&self) -> bool {
        matches!(self, TemplateType::Email)
    }
}

impl std::fmt::Display for TemplateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "email" => Ok(TemplateType::Email),
            "slack" => Ok(TemplateType::Slack),
            other => Err(ValidationError::InvalidValue {
                field: "template_type",
                message: format!("'{}' is not one of: email, slack", other),
            }),
        }
    }
}

/// Notification template domain model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NotificationTemplate {
    pub id: Uuid,
    pub name: String,
    pub template_type: TemplateType,
    pub category: String,
    pub subject_template: Option<String>,
    pub body_template: String,
    pub variables: Vec<String>,
    pub is_active: bool,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated notification template ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotificationTemplate {
    pub name: String,
    pub template_type: TemplateType,
    pub category: String,
    pub subject_template: Option<String>,
    pub body_template: String,
    pub variables: Vec<String>,
    pub is_active: bool,
    pub is_default: bool,
}

fn default_true() -> bool {
    true
}

/// Request to create a notification template.
///
/// `template_type` is kept as text so an unknown channel is reported as a
/// validation error on that field.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateNotificationTemplateRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: String,
    #[serde(default)]
    pub template_type: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "Subject must be at most 255 characters"))]
    pub subject_template: Option<String>,
    #[serde(default)]
    pub body_template: String,
    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_variable_names"))]
    pub variables: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_default: bool,
}

/// Partial update of a notification template.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateNotificationTemplateRequest {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
    pub template_type: Option<String>,
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255, message = "Subject must be at most 255 characters"))]
    pub subject_template: Option<Option<String>>,
    pub body_template: Option<String>,
    #[validate(custom(function = "shared::validation::validate_variable_names"))]
    pub variables: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub is_default: Option<bool>,
}

/// A validated patch with the channel already parsed.
#[derive(Debug, Clone, Default)]
pub struct NotificationTemplatePatch {
    pub name: Option<String>,
    pub template_type: Option<TemplateType>,
    pub category: Option<String>,
    pub subject_template: Option<Option<String>>,
    pub body_template: Option<String>,
    pub variables: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub is_default: Option<bool>,
}

impl NotificationTemplate {
    /// Applies a validated patch. Absent fields are left unchanged.
    pub fn apply(&mut self, patch: NotificationTemplatePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(template_type) = patch.template_type {
            self.template_type = template_type;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(subject_template) = patch.subject_template {
            self.subject_template = subject_template;
        }
        if let Some(body_template) = patch.body_template {
            self.body_template = body_template;
        }
        if let Some(variables) = patch.variables {
            self.variables = variables;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(is_default) = patch.is_default {
            self.is_default = is_default;
        }
    }
}

/// Filter for listing notification templates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationTemplateFilter {
    pub template_type: Option<TemplateType>,
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_type_from_str() {
        assert_eq!("email".parse::<TemplateType>().unwrap(), TemplateType::Email);
        assert_eq!(" slack ".parse::<TemplateType>().unwrap(), TemplateType::Slack);

        let err = "sms".parse::<TemplateType>().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidValue {
                field: "template_type",
                ..
            }
        ));
    }

    #[test]
    fn test_template_type_serde() {
        assert_eq!(serde_json::to_string(&TemplateType::Slack).unwrap(), "\"slack\"");
        let t: TemplateType = serde_json::from_str("\"email\"").unwrap();
        assert_eq!(t, TemplateType::Email);
    }

    #[test]
    fn test_requires_subject() {
        assert!(TemplateType::Email.requires_subject());
        assert!(!TemplateType::Slack.requires_subject());
    }

    #[test]
    fn test_update_request_subject_tristate() {
        let absent: UpdateNotificationTemplateRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.subject_template, None);

        let cleared: UpdateNotificationTemplateRequest =
            serde_json::from_str(r#"{"subject_template": null}"#).unwrap();
        assert_eq!(cleared.subject_template, Some(None));
    }

    #[test]
    fn test_update_request_applies_create_limits() {
        let long_subject = UpdateNotificationTemplateRequest {
            subject_template: Some(Some("s".repeat(300))),
            ..Default::default()
        };
        let errors = long_subject.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("subject_template"));

        let blank_variable = UpdateNotificationTemplateRequest {
            variables: Some(vec![String::new()]),
            ..Default::default()
        };
        let errors = blank_variable.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("variables"));
    }
}
