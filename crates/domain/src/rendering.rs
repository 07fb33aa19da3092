//! Template renderer abstraction.
//!
//! The email template service renders the built-in templates through this
//! trait when seeding defaults. The production renderer lives in the api
//! crate; [`StaticTemplateRenderer`] is a table-driven implementation for
//! development and tests.

use std::collections::HashMap;
use thiserror::Error;

use crate::error::DomainError;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown template: {0}")]
    UnknownTemplate(String),
}

impl From<RenderError> for DomainError {
    fn from(err: RenderError) -> Self {
        DomainError::Configuration(err.to_string())
    }
}

/// Renders named built-in templates.
pub trait TemplateRenderer: Send + Sync {
    /// Renders `template_name` with `context`. Context values are inserted verbatim.
    fn render(
        &self,
        template_name: &str,
        context: &HashMap<String, String>,
    ) -> Result<String, RenderError>;

    /// CSS shared by styled notification emails.
    fn notification_style(&self) -> String;
}

/// Renderer backed by an in-memory table of `{token}` templates.
#[derive(Debug, Clone, Default)]
pub struct StaticTemplateRenderer {
    templates: HashMap<String, String>,
    style: String,
}

impl StaticTemplateRenderer {
    pub fn new(style: impl Into<String>) -> Self {
        Self {
            templates: HashMap::new(),
            style: style.into(),
        }
    }

    pub fn with_template(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.templates.insert(name.into(), body.into());
        self
    }
}

impl TemplateRenderer for StaticTemplateRenderer {
    fn render(
        &self,
        template_name: &str,
        context: &HashMap<String, String>,
    ) -> Result<String, RenderError> {
        let body = self
            .templates
            .get(template_name)
            .ok_or_else(|| RenderError::UnknownTemplate(template_name.to_string()))?;
        Ok(shared::placeholders::substitute(body, context))
    }

    fn notification_style(&self) -> String {
        self.style.clone()
    }
}
