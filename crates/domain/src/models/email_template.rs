//! Admin-managed email templates with a subject line and HTML body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::OffsetParams;
use uuid::Uuid;
use validator::Validate;

/// Email template domain model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EmailTemplate {
    pub id: Uuid,
    pub name: String,
    /// Free-form classification: invitation, daily_digest, password_reset, ...
    pub category: String,
    pub subject_template: String,
    pub body_html: String,
    pub variables: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated email template ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmailTemplate {
    pub name: String,
    pub category: String,
    pub subject_template: String,
    pub body_html: String,
    pub variables: Vec<String>,
    pub is_active: bool,
}

impl EmailTemplate {
    /// Applies a validated patch. Absent fields are left unchanged.
    pub fn apply(&mut self, patch: UpdateEmailTemplateRequest) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(subject_template) = patch.subject_template {
            self.subject_template = subject_template;
        }
        if let Some(body_html) = patch.body_html {
            self.body_html = body_html;
        }
        if let Some(variables) = patch.variables {
            self.variables = variables;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }
}

fn default_true() -> bool {
    true
}

/// Request to create an email template.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateEmailTemplateRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "Subject must be at most 255 characters"))]
    pub subject_template: String,
    #[serde(default)]
    pub body_html: String,
    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_variable_names"))]
    pub variables: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Partial update of an email template.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateEmailTemplateRequest {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,
    #[validate(length(max = 255, message = "Subject must be at most 255 characters"))]
    pub subject_template: Option<String>,
    pub body_html: Option<String>,
    #[validate(custom(function = "shared::validation::validate_variable_names"))]
    pub variables: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

/// Query parameters for searching email templates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailTemplateSearchQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    /// Case-insensitive substring match on the template name.
    pub search: Option<String>,
}

impl EmailTemplateSearchQuery {
    /// Returns `(skip, limit)` with defaults and bounds applied.
    pub fn page(&self) -> (u32, u32) {
        OffsetParams {
            skip: self.skip,
            limit: self.limit,
        }
        .resolve()
    }

    /// Returns the search term, ignoring blank input.
    pub fn term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .and_then(shared::validation::trimmed_non_empty)
    }
}
