//! Notification template administration.
//!
//! Baseline templates are only ever created, never overwritten: admins own
//! the stored copies once they exist.

use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use super::template_variables::undeclared_placeholders;
use super::{BatchFailure, Seeded};
use crate::error::{DomainError, DomainResult, ValidationError};
use crate::models::{
    CreateNotificationTemplateRequest, NewNotificationTemplate, NotificationTemplate,
    NotificationTemplateFilter, NotificationTemplatePatch, TemplateType,
    UpdateNotificationTemplateRequest,
};
use crate::repositories::NotificationTemplateStore;
use crate::seeds::{NotificationTemplateSeed, SeedSource};

const ENTITY: &str = "Notification template";

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    shared::validation::trimmed_non_empty(value)
        .map(str::to_string)
        .ok_or(ValidationError::MissingField { field })
}

fn subject_present(subject: Option<&str>) -> bool {
    subject.map_or(false, |s| !shared::validation::is_blank(s))
}

fn duplicate(name: &str, template_type: TemplateType) -> DomainError {
    ValidationError::DuplicateKey {
        entity: ENTITY,
        key: format!("{} ({})", name, template_type),
    }
    .into()
}

#[derive(Clone)]
pub struct NotificationTemplateAdminService {
    store: Arc<dyn NotificationTemplateStore>,
    seeds: Arc<dyn SeedSource>,
}

impl NotificationTemplateAdminService {
    pub fn new(store: Arc<dyn NotificationTemplateStore>, seeds: Arc<dyn SeedSource>) -> Self {
        Self { store, seeds }
    }

    pub async fn validate_create(
        &self,
        request: CreateNotificationTemplateRequest,
    ) -> DomainResult<NewNotificationTemplate> {
        let name = required("name", &request.name)?;
        let template_type: TemplateType = required("template_type", &request.template_type)?.parse()?;
        let category = required("category", &request.category)?;
        required("body_template", &request.body_template)?;

        if template_type.requires_subject() && !subject_present(request.subject_template.as_deref()) {
            return Err(ValidationError::MissingField {
                field: "subject_template",
            }
            .into());
        }

        if self
            .store
            .find_by_name_and_type(&name, template_type)
            .await?
            .is_some()
        {
            return Err(duplicate(&name, template_type));
        }

        Ok(NewNotificationTemplate {
            name,
            template_type,
            category,
            subject_template: request
                .subject_template
                .filter(|s| !shared::validation::is_blank(s)),
            body_template: request.body_template,
            variables: request.variables,
            is_active: request.is_active,
            is_default: request.is_default,
        })
    }

    /// Checks a patch against the existing row. The subject rule is checked
    /// on the merged result, so switching a Slack template to email requires
    /// a subject in the same request when none is stored.
    pub async fn validate_update(
        &self,
        existing: &NotificationTemplate,
        request: UpdateNotificationTemplateRequest,
    ) -> DomainResult<NotificationTemplatePatch> {
        let name = match request.name.as_deref() {
            Some(name) => Some(
                shared::validation::trimmed_non_empty(name)
                    .ok_or(ValidationError::EmptyValue { field: "name" })?
                    .to_string(),
            ),
            None => None,
        };
        let template_type = match request.template_type.as_deref() {
            Some(raw) if shared::validation::is_blank(raw) => {
                return Err(ValidationError::EmptyValue {
                    field: "template_type",
                }
                .into())
            }
            Some(raw) => Some(raw.parse::<TemplateType>()?),
            None => None,
        };
        let category = match request.category.as_deref() {
            Some(category) => Some(
                shared::validation::trimmed_non_empty(category)
                    .ok_or(ValidationError::EmptyValue { field: "category" })?
                    .to_string(),
            ),
            None => None,
        };
        if let Some(body) = request.body_template.as_deref() {
            if shared::validation::is_blank(body) {
                return Err(ValidationError::EmptyValue {
                    field: "body_template",
                }
                .into());
            }
        }

        let subject_template = request
            .subject_template
            .map(|subject| subject.filter(|s| !shared::validation::is_blank(s)));

        let merged_name = name.as_deref().unwrap_or(&existing.name);
        let merged_type = template_type.unwrap_or(existing.template_type);
        let merged_subject = match &subject_template {
            Some(subject) => subject.as_deref(),
            None => existing.subject_template.as_deref(),
        };

        if merged_type.requires_subject() && !subject_present(merged_subject) {
            return Err(ValidationError::MissingField {
                field: "subject_template",
            }
            .into());
        }

        if merged_name != existing.name || merged_type != existing.template_type {
            if let Some(other) = self
                .store
                .find_by_name_and_type(merged_name, merged_type)
                .await?
            {
                if other.id != existing.id {
                    return Err(duplicate(merged_name, merged_type));
                }
            }
        }

        Ok(NotificationTemplatePatch {
            name,
            template_type,
            category,
            subject_template,
            body_template: request.body_template,
            variables: request.variables,
            is_active: request.is_active,
            is_default: request.is_default,
        })
    }

    pub async fn list(
        &self,
        filter: &NotificationTemplateFilter,
    ) -> DomainResult<Vec<NotificationTemplate>> {
        Ok(self.store.list(filter).await?)
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<NotificationTemplate> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    pub async fn create(
        &self,
        request: CreateNotificationTemplateRequest,
    ) -> DomainResult<NotificationTemplate> {
        let new_template = self.validate_create(request).await?;
        hint_undeclared(&new_template.name, &new_template.body_template, &new_template.variables);

        let template = self.store.create(new_template).await?;
        info!(
            template_id = %template.id,
            name = %template.name,
            template_type = %template.template_type,
            "Notification template created"
        );
        Ok(template)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateNotificationTemplateRequest,
    ) -> DomainResult<NotificationTemplate> {
        let mut template = self.get(id).await?;
        let patch = self.validate_update(&template, request).await?;
        template.apply(patch);
        hint_undeclared(&template.name, &template.body_template, &template.variables);

        let template = self.store.update(&template).await?;
        info!(template_id = %template.id, name = %template.name, "Notification template updated");
        Ok(template)
    }

    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if !self.store.delete(id).await? {
            return Err(DomainError::not_found(ENTITY, id));
        }
        info!(template_id = %id, "Notification template deleted");
        Ok(())
    }

    /// Loads the baseline templates. An empty list is a packaging defect.
    pub fn default_templates(&self) -> DomainResult<Vec<NotificationTemplateSeed>> {
        let templates = self.seeds.load_default_notification_templates()?;
        if templates.is_empty() {
            return Err(DomainError::Configuration(
                "default notification templates missing (notification_templates/defaults.json)"
                    .to_string(),
            ));
        }
        Ok(templates)
    }

    async fn ensure_seed(
        &self,
        seed: &NotificationTemplateSeed,
    ) -> DomainResult<Seeded<NotificationTemplate>> {
        if let Some(existing) = self
            .store
            .find_by_name_and_type(&seed.name, seed.template_type)
            .await?
        {
            return Ok(Seeded::skipped(existing));
        }

        let template = self.store.create(seed.to_new()).await?;
        info!(
            name = %template.name,
            template_type = %template.template_type,
            outcome = "created",
            "Ensured default notification template"
        );
        Ok(Seeded::created(template))
    }

    /// Creates every missing baseline template in file order, stopping at the
    /// first failure. Existing templates are reported as skipped.
    pub async fn ensure_all_defaults(
        &self,
    ) -> Result<Vec<Seeded<NotificationTemplate>>, BatchFailure<NotificationTemplate>> {
        let seeds = self
            .default_templates()
            .map_err(|e| BatchFailure::new(Vec::new(), e))?;

        let mut completed = Vec::with_capacity(seeds.len());
        for seed in &seeds {
            match self.ensure_seed(seed).await {
                Ok(seeded) => completed.push(seeded),
                Err(error) => return Err(BatchFailure::new(completed, error)),
            }
        }
        Ok(completed)
    }

    /// Creates the missing baseline templates and returns only those.
    pub async fn import_missing_defaults(&self) -> DomainResult<Vec<NotificationTemplate>> {
        let results = self.ensure_all_defaults().await?;
        Ok(results
            .into_iter()
            .filter(|s| s.outcome == super::SeedOutcome::Created)
            .map(|s| s.entity)
            .collect())
    }
}

fn hint_undeclared(name: &str, body: &str, declared: &[String]) {
    let undeclared = undeclared_placeholders(body, declared);
    if !undeclared.is_empty() {
        debug!(name = %name, undeclared = ?undeclared, "Notification template references undeclared placeholders");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryNotificationTemplateStore;
    use crate::services::{fixtures, SeedOutcome};

    fn service() -> (NotificationTemplateAdminService, Arc<InMemoryNotificationTemplateStore>) {
        let store = Arc::new(InMemoryNotificationTemplateStore::new());
        let service =
            NotificationTemplateAdminService::new(store.clone(), Arc::new(fixtures::seed_source()));
        (service, store)
    }

    fn create_request(name: &str, template_type: &str) -> CreateNotificationTemplateRequest {
        CreateNotificationTemplateRequest {
            name: name.to_string(),
            template_type: template_type.to_string(),
            category: "alert".to_string(),
            subject_template: None,
            body_template: "Heads up {recipient_name}".to_string(),
            variables: vec!["recipient_name".to_string()],
            is_active: true,
            is_default: false,
        }
    }

    #[tokio::test]
    async fn test_import_missing_is_additive_only() {
        let (service, store) = service();

        let mut custom = create_request("high_value_slack", "slack");
        custom.body_template = "Admin edited body".to_string();
        let existing = service.create(custom).await.unwrap();

        let created = service.import_missing_defaults().await.unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].name, "daily_digest_email");

        let untouched = service.get(existing.id).await.unwrap();
        assert_eq!(untouched.body_template, "Admin edited body");
        assert_eq!(untouched.updated_at, existing.updated_at);
        assert_eq!(store.len().await, 2);

        assert!(service.import_missing_defaults().await.unwrap().is_empty());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_ensure_all_reports_skipped() {
        let (service, _) = service();

        let first = service.ensure_all_defaults().await.unwrap();
        assert!(first.iter().all(|s| s.outcome == SeedOutcome::Created));

        let second = service.ensure_all_defaults().await.unwrap();
        assert!(second.iter().all(|s| s.outcome == SeedOutcome::Skipped));
        assert_eq!(first[0].entity.id, second[0].entity.id);
    }

    #[tokio::test]
    async fn test_same_name_allowed_per_channel() {
        let (service, _) = service();
        let mut email = create_request("lead_alert", "email");
        email.subject_template = Some("New lead".to_string());

        service.create(email.clone()).await.unwrap();
        service.create(create_request("lead_alert", "slack")).await.unwrap();

        let err = service.create(email).await.unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn test_create_validation() {
        let (service, _) = service();

        let err = service.create(create_request("x", "sms")).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::InvalidValue { field: "template_type", .. })
        ));

        let err = service.create(create_request("x", "")).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::MissingField { field: "template_type" })
        ));

        let err = service.create(create_request("x", "email")).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::MissingField { field: "subject_template" })
        ));

        let mut req = create_request("x", "slack");
        req.body_template = "  ".to_string();
        let err = service.create(req).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::MissingField { field: "body_template" })
        ));
    }

    #[tokio::test]
    async fn test_update_switching_to_email_requires_subject() {
        let (service, _) = service();
        let slack = service.create(create_request("lead_alert", "slack")).await.unwrap();

        let err = service
            .update(
                slack.id,
                UpdateNotificationTemplateRequest {
                    template_type: Some("email".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::MissingField { field: "subject_template" })
        ));

        let updated = service
            .update(
                slack.id,
                UpdateNotificationTemplateRequest {
                    template_type: Some("email".to_string()),
                    subject_template: Some(Some("New lead".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.template_type, TemplateType::Email);
        assert_eq!(updated.subject_template.as_deref(), Some("New lead"));

        let err = service
            .update(
                slack.id,
                UpdateNotificationTemplateRequest {
                    subject_template: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_blank_subject_is_stored_as_none() {
        let (service, _) = service();
        let mut request = create_request("lead_alert", "slack");
        request.subject_template = Some("Lead".to_string());
        let slack = service.create(request).await.unwrap();

        let updated = service
            .update(
                slack.id,
                UpdateNotificationTemplateRequest {
                    subject_template: Some(Some("   ".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.subject_template, None);
    }

    #[tokio::test]
    async fn test_update_into_taken_identity_rejected() {
        let (service, _) = service();
        service.create(create_request("lead_alert", "slack")).await.unwrap();
        let other = service.create(create_request("other_alert", "slack")).await.unwrap();

        let err = service
            .update(
                other.id,
                UpdateNotificationTemplateRequest {
                    name: Some("lead_alert".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_duplicate());

        let renamed = service
            .update(
                other.id,
                UpdateNotificationTemplateRequest {
                    name: Some("other_alert".to_string()),
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!renamed.is_active);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let (service, _) = service();
        service.ensure_all_defaults().await.unwrap();

        let email = service
            .list(&NotificationTemplateFilter {
                template_type: Some(TemplateType::Email),
                category: None,
            })
            .await
            .unwrap();
        assert_eq!(email.len(), 1);
        assert_eq!(email[0].name, "daily_digest_email");

        let alerts = service
            .list(&NotificationTemplateFilter {
                template_type: None,
                category: Some("alert".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].template_type, TemplateType::Slack);
    }

    #[tokio::test]
    async fn test_delete() {
        let (service, store) = service();
        let created = service.create(create_request("lead_alert", "slack")).await.unwrap();

        service.delete(created.id).await.unwrap();
        assert!(store.is_empty().await);

        let err = service.delete(created.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
