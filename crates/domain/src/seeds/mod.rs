//! Shipped default content.
//!
//! A [`SeedSource`] supplies the default content blocks, the baseline
//! notification templates and the styled HTML bodies of the digest emails.
//! [`FileSeedSource`] reads them from a directory on disk;
//! [`StaticSeedSource`] holds them in memory.

pub mod file;
pub mod memory;

use serde::Deserialize;
use thiserror::Error;

use crate::error::DomainError;
use crate::models::{NewContentBlock, NewNotificationTemplate, TemplateType};

pub use file::FileSeedSource;
pub use memory::StaticSeedSource;

/// Marker replaced by the renderer's notification style in styled seeds.
pub const STYLE_MARKER: &str = "__STYLE__";

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed file missing: {path}")]
    Missing { path: String },

    #[error("seed file {path} is malformed: {message}")]
    Malformed { path: String, message: String },

    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid seed template id: {0}")]
    InvalidTemplateId(String),
}

impl From<SeedError> for DomainError {
    fn from(err: SeedError) -> Self {
        DomainError::Configuration(err.to_string())
    }
}

/// A default content block with its body already loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlockSeed {
    pub key: String,
    pub category: String,
    pub title: String,
    pub html_content: String,
    pub description: Option<String>,
    pub variables: Vec<String>,
}

impl ContentBlockSeed {
    pub fn to_new(&self) -> NewContentBlock {
        NewContentBlock {
            key: self.key.clone(),
            category: self.category.clone(),
            title: self.title.clone(),
            html_content: self.html_content.clone(),
            description: self.description.clone(),
            variables: self.variables.clone(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// A baseline notification template definition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotificationTemplateSeed {
    pub name: String,
    pub template_type: TemplateType,
    pub category: String,
    #[serde(default)]
    pub subject_template: Option<String>,
    pub body_template: String,
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_default: bool,
}

impl NotificationTemplateSeed {
    pub fn to_new(&self) -> NewNotificationTemplate {
        NewNotificationTemplate {
            name: self.name.clone(),
            template_type: self.template_type,
            category: self.category.clone(),
            subject_template: self.subject_template.clone(),
            body_template: self.body_template.clone(),
            variables: self.variables.clone(),
            is_active: self.is_active,
            is_default: self.is_default,
        }
    }
}

/// Source of shipped defaults.
///
/// Loaders return an empty list when the defaults file exists but holds no
/// usable entries. Callers decide whether that is a fault.
pub trait SeedSource: Send + Sync {
    fn load_default_content_blocks(&self) -> Result<Vec<ContentBlockSeed>, SeedError>;

    fn load_default_notification_templates(
        &self,
    ) -> Result<Vec<NotificationTemplateSeed>, SeedError>;

    /// Returns the styled HTML seed `template_id` with `style` injected, or
    /// `None` when the seed is absent or empty.
    fn render_styled_template(
        &self,
        template_id: &str,
        style: &str,
    ) -> Result<Option<String>, SeedError>;
}

/// Injects `style` at every [`STYLE_MARKER`] and trims the result.
pub fn apply_style(html: &str, style: &str) -> Option<String> {
    let rendered = html.replace(STYLE_MARKER, style);
    let trimmed = rendered.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_style() {
        let html = "  <style>__STYLE__</style><p>{user_name}</p>\n";
        assert_eq!(
            apply_style(html, "p{margin:0}").as_deref(),
            Some("<style>p{margin:0}</style><p>{user_name}</p>")
        );
    }

    #[test]
    fn test_apply_style_empty_result() {
        assert_eq!(apply_style("  __STYLE__  ", ""), None);
        assert_eq!(apply_style("", "body{}"), None);
    }

    #[test]
    fn test_notification_seed_defaults() {
        let seed: NotificationTemplateSeed = serde_json::from_str(
            r#"{"name": "high_value_slack", "template_type": "slack", "category": "alert", "body_template": "New lead {title}"}"#,
        )
        .unwrap();
        assert!(seed.is_active);
        assert!(!seed.is_default);
        assert_eq!(seed.subject_template, None);
        assert_eq!(seed.to_new().template_type, TemplateType::Slack);
    }

    #[test]
    fn test_seed_error_is_configuration_fault() {
        let err: DomainError = SeedError::Missing {
            path: "content_blocks/defaults.json".into(),
        }
        .into();
        assert!(matches!(err, DomainError::Configuration(_)));
        assert!(err.to_string().contains("content_blocks/defaults.json"));
    }
}
