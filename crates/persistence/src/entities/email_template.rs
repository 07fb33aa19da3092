//! Email template entity for database operations.

use chrono::{DateTime, Utc};
use domain::models::EmailTemplate;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row of `service_email_templates`.
#[derive(Debug, Clone, FromRow)]
pub struct EmailTemplateEntity {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub subject_template: String,
    pub body_html: String,
    pub variables: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EmailTemplateEntity> for EmailTemplate {
    fn from(entity: EmailTemplateEntity) -> Self {
        EmailTemplate {
            id: entity.id,
            name: entity.name,
            category: entity.category,
            subject_template: entity.subject_template,
            body_html: entity.body_html,
            variables: entity.variables,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_template_entity_to_domain() {
        let now = Utc::now();
        let entity = EmailTemplateEntity {
            id: Uuid::new_v4(),
            name: "password_reset".to_string(),
            category: "password_reset".to_string(),
            subject_template: "Password reset request".to_string(),
            body_html: "<a href=\"{reset_url}\">Reset</a>".to_string(),
            variables: vec!["user_name".to_string(), "reset_url".to_string()],
            is_active: false,
            created_at: now,
            updated_at: now,
        };

        let template: EmailTemplate = entity.clone().into();
        assert_eq!(template.id, entity.id);
        assert_eq!(template.variables, entity.variables);
        assert!(!template.is_active);
    }
}
