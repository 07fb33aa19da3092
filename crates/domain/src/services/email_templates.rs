//! Email template administration and default seeding.
//!
//! The five shipped email templates are described by [`DEFAULT_EMAIL_TEMPLATES`].
//! Each default is either rendered through the injected [`TemplateRenderer`]
//! with every variable mapped to its own `{token}`, or read from a styled
//! HTML seed with the renderer's notification style injected. Either way the
//! stored body keeps its placeholders for send-time substitution.

use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use super::template_variables::undeclared_placeholders;
use super::{BatchFailure, Seeded};
use crate::error::{DomainError, DomainResult, ValidationError};
use crate::models::{CreateEmailTemplateRequest, EmailTemplate, NewEmailTemplate, UpdateEmailTemplateRequest};
use crate::rendering::TemplateRenderer;
use crate::repositories::EmailTemplateStore;
use crate::seeds::SeedSource;

const ENTITY: &str = "Email template";

/// Where the body of a default email template comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultContent {
    /// Built-in template rendered by the [`TemplateRenderer`].
    Rendered(&'static str),
    /// Styled HTML seed from the [`SeedSource`].
    Styled(&'static str),
}

/// Static description of a shipped email template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailTemplateDefault {
    pub name: &'static str,
    pub category: &'static str,
    pub subject: &'static str,
    pub content: DefaultContent,
    pub variables: &'static [&'static str],
}

const DIGEST_VARIABLES: &[&str] = &[
    "user_name",
    "count",
    "assignments",
    "app_url",
    "assignments_html",
    "smart_signals",
    "smart_signals_total_open",
    "smart_signals_section_html",
];

/// Shipped email templates in seeding order.
pub static DEFAULT_EMAIL_TEMPLATES: [EmailTemplateDefault; 5] = [
    EmailTemplateDefault {
        name: "invitation",
        category: "invitation",
        subject: "{inviter_name} invited you to join {tenant_name}",
        content: DefaultContent::Rendered("invitation"),
        variables: &[
            "user_name",
            "inviter_name",
            "tenant_name",
            "accept_url",
            "temporary_password",
            "email",
        ],
    },
    EmailTemplateDefault {
        name: "daily_digest",
        category: "daily_digest",
        subject: "Your daily digest - {count} new opportunities",
        content: DefaultContent::Styled("daily_digest"),
        variables: DIGEST_VARIABLES,
    },
    EmailTemplateDefault {
        name: "weekly_digest",
        category: "weekly_digest",
        subject: "Your weekly digest - {count} new opportunities",
        content: DefaultContent::Styled("weekly_digest"),
        variables: DIGEST_VARIABLES,
    },
    EmailTemplateDefault {
        name: "password_reset",
        category: "password_reset",
        subject: "Password reset request",
        content: DefaultContent::Rendered("password_reset"),
        variables: &["user_name", "reset_url"],
    },
    EmailTemplateDefault {
        name: "usage_alert",
        category: "usage_alert",
        subject: "Usage Alert: {usage_type} at {percentage}% of limit",
        content: DefaultContent::Rendered("usage_alert"),
        variables: &[
            "tenant_name",
            "usage_type",
            "percentage",
            "current_usage",
            "limit",
            "remaining",
            "app_url",
        ],
    },
];

impl EmailTemplateDefault {
    pub fn find(name: &str) -> Option<&'static EmailTemplateDefault> {
        DEFAULT_EMAIL_TEMPLATES.iter().find(|d| d.name == name)
    }

    pub fn variable_names(&self) -> Vec<String> {
        self.variables.iter().map(|v| v.to_string()).collect()
    }
}

fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if shared::validation::is_blank(value) {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(())
    }
}

fn non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if shared::validation::is_blank(value) {
        Err(ValidationError::EmptyValue { field })
    } else {
        Ok(())
    }
}

#[derive(Clone)]
pub struct EmailTemplateService {
    store: Arc<dyn EmailTemplateStore>,
    seeds: Arc<dyn SeedSource>,
    renderer: Arc<dyn TemplateRenderer>,
}

impl EmailTemplateService {
    pub fn new(
        store: Arc<dyn EmailTemplateStore>,
        seeds: Arc<dyn SeedSource>,
        renderer: Arc<dyn TemplateRenderer>,
    ) -> Self {
        Self {
            store,
            seeds,
            renderer,
        }
    }

    pub async fn validate_create(
        &self,
        request: CreateEmailTemplateRequest,
    ) -> DomainResult<NewEmailTemplate> {
        required("name", &request.name)?;
        required("category", &request.category)?;
        required("subject_template", &request.subject_template)?;
        required("body_html", &request.body_html)?;

        let name = request.name.trim().to_string();
        if self.store.find_by_name(&name).await?.is_some() {
            return Err(ValidationError::DuplicateKey { entity: ENTITY, key: name }.into());
        }

        Ok(NewEmailTemplate {
            name,
            category: request.category.trim().to_string(),
            subject_template: request.subject_template,
            body_html: request.body_html,
            variables: request.variables,
            is_active: request.is_active,
        })
    }

    pub async fn validate_update(
        &self,
        existing: &EmailTemplate,
        mut patch: UpdateEmailTemplateRequest,
    ) -> DomainResult<UpdateEmailTemplateRequest> {
        if let Some(name) = patch.name.as_deref() {
            let name = shared::validation::trimmed_non_empty(name)
                .ok_or(ValidationError::EmptyValue { field: "name" })?
                .to_string();
            if name != existing.name {
                if let Some(other) = self.store.find_by_name(&name).await? {
                    if other.id != existing.id {
                        return Err(ValidationError::DuplicateKey { entity: ENTITY, key: name }.into());
                    }
                }
            }
            patch.name = Some(name);
        }
        if let Some(category) = patch.category.as_deref() {
            let category = shared::validation::trimmed_non_empty(category)
                .ok_or(ValidationError::EmptyValue { field: "category" })?
                .to_string();
            patch.category = Some(category);
        }
        if let Some(subject) = patch.subject_template.as_deref() {
            non_empty("subject_template", subject)?;
        }
        if let Some(body) = patch.body_html.as_deref() {
            non_empty("body_html", body)?;
        }

        Ok(patch)
    }

    /// Returns one page of templates ordered by creation and the total match count.
    pub async fn search_templates(
        &self,
        skip: u32,
        limit: u32,
        search: Option<&str>,
    ) -> DomainResult<(Vec<EmailTemplate>, u64)> {
        Ok(self.store.search(skip, limit, search).await?)
    }

    pub async fn get_template(&self, id: Uuid) -> DomainResult<EmailTemplate> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    pub async fn create_template(
        &self,
        request: CreateEmailTemplateRequest,
    ) -> DomainResult<EmailTemplate> {
        let new_template = self.validate_create(request).await?;
        hint_undeclared(&new_template.name, &new_template.body_html, &new_template.variables);

        let template = self.store.create(new_template).await?;
        info!(template_id = %template.id, name = %template.name, "Email template created");
        Ok(template)
    }

    pub async fn update_template(
        &self,
        id: Uuid,
        patch: UpdateEmailTemplateRequest,
    ) -> DomainResult<EmailTemplate> {
        let mut template = self.get_template(id).await?;
        let patch = self.validate_update(&template, patch).await?;
        template.apply(patch);
        hint_undeclared(&template.name, &template.body_html, &template.variables);

        let template = self.store.update(&template).await?;
        info!(template_id = %template.id, name = %template.name, "Email template updated");
        Ok(template)
    }

    pub async fn delete_template(&self, id: Uuid) -> DomainResult<()> {
        if !self.store.delete(id).await? {
            return Err(DomainError::not_found(ENTITY, id));
        }
        info!(template_id = %id, "Email template deleted");
        Ok(())
    }

    /// Produces the body of a default with its placeholders intact.
    pub fn render_default(&self, default: &EmailTemplateDefault) -> DomainResult<String> {
        match default.content {
            DefaultContent::Rendered(template_name) => {
                let context = shared::placeholders::placeholder_context(default.variables);
                Ok(self.renderer.render(template_name, &context)?)
            }
            DefaultContent::Styled(template_id) => {
                let style = self.renderer.notification_style();
                self.seeds
                    .render_styled_template(template_id, &style)?
                    .ok_or_else(|| {
                        DomainError::Configuration(format!(
                            "email template seed missing (email_templates/{}.html)",
                            template_id
                        ))
                    })
            }
        }
    }

    /// Creates or overwrites the stored template for one default.
    ///
    /// An existing row keeps its id, creation time and `is_active` flag;
    /// every content field is replaced.
    pub async fn ensure_default(
        &self,
        default: &EmailTemplateDefault,
    ) -> DomainResult<Seeded<EmailTemplate>> {
        let body_html = self.render_default(default)?;

        match self.store.find_by_name(default.name).await? {
            Some(mut existing) => {
                existing.category = default.category.to_string();
                existing.subject_template = default.subject.to_string();
                existing.body_html = body_html;
                existing.variables = default.variable_names();

                let template = self.store.update(&existing).await?;
                info!(name = %template.name, outcome = "updated", "Ensured default email template");
                Ok(Seeded::updated(template))
            }
            None => {
                let template = self
                    .store
                    .create(NewEmailTemplate {
                        name: default.name.to_string(),
                        category: default.category.to_string(),
                        subject_template: default.subject.to_string(),
                        body_html,
                        variables: default.variable_names(),
                        is_active: true,
                    })
                    .await?;
                info!(name = %template.name, outcome = "created", "Ensured default email template");
                Ok(Seeded::created(template))
            }
        }
    }

    pub async fn ensure_invitation_default(&self) -> DomainResult<EmailTemplate> {
        let default = &DEFAULT_EMAIL_TEMPLATES[0];
        Ok(self.ensure_default(default).await?.entity)
    }

    /// Ensures all five defaults in order, stopping at the first failure.
    pub async fn ensure_all_defaults(
        &self,
    ) -> Result<Vec<Seeded<EmailTemplate>>, BatchFailure<EmailTemplate>> {
        let mut completed = Vec::with_capacity(DEFAULT_EMAIL_TEMPLATES.len());
        for default in &DEFAULT_EMAIL_TEMPLATES {
            match self.ensure_default(default).await {
                Ok(seeded) => completed.push(seeded),
                Err(error) => return Err(BatchFailure::new(completed, error)),
            }
        }
        Ok(completed)
    }
}

fn hint_undeclared(name: &str, body: &str, declared: &[String]) {
    let undeclared = undeclared_placeholders(body, declared);
    if !undeclared.is_empty() {
        debug!(name = %name, undeclared = ?undeclared, "Email template references undeclared placeholders");
    }
}
