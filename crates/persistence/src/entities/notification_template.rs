//! Notification template entity for database operations.

use chrono::{DateTime, Utc};
use domain::models::{NotificationTemplate, TemplateType};
use domain::repositories::StoreError;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row of `notification_templates`. `template_type` is stored as text.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationTemplateEntity {
    pub id: Uuid,
    pub name: String,
    pub template_type: String,
    pub category: String,
    pub subject_template: Option<String>,
    pub body_template: String,
    pub variables: Vec<String>,
    pub is_active: bool,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<NotificationTemplateEntity> for NotificationTemplate {
    type Error = StoreError;

    fn try_from(entity: NotificationTemplateEntity) -> Result<Self, Self::Error> {
        let template_type: TemplateType = entity.template_type.parse().map_err(|_| {
            StoreError::Backend(format!(
                "notification template {} has unknown template_type '{}'",
                entity.id, entity.template_type
            ))
        })?;

        Ok(NotificationTemplate {
            id: entity.id,
            name: entity.name,
            template_type,
            category: entity.category,
            subject_template: entity.subject_template,
            body_template: entity.body_template,
            variables: entity.variables,
            is_active: entity.is_active,
            is_default: entity.is_default,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(template_type: &str) -> NotificationTemplateEntity {
        let now = Utc::now();
        NotificationTemplateEntity {
            id: Uuid::new_v4(),
            name: "high_value_slack".to_string(),
            template_type: template_type.to_string(),
            category: "alert".to_string(),
            subject_template: None,
            body_template: "High value signal: {title}".to_string(),
            variables: vec!["title".to_string()],
            is_active: true,
            is_default: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_notification_template_entity_to_domain() {
        let template = NotificationTemplate::try_from(entity("slack")).unwrap();
        assert_eq!(template.template_type, TemplateType::Slack);
        assert!(template.is_default);
    }

    #[test]
    fn test_unknown_template_type_is_backend_error() {
        let err = NotificationTemplate::try_from(entity("sms")).unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
