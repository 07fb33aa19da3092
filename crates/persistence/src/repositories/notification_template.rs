//! Notification template repository for database operations.

use async_trait::async_trait;
use domain::models::{
    NewNotificationTemplate, NotificationTemplate, NotificationTemplateFilter, TemplateType,
};
use domain::repositories::{NotificationTemplateStore, StoreError, StoreResult};
use sqlx::PgPool;
use uuid::Uuid;

use super::store_error;
use crate::entities::NotificationTemplateEntity;
use crate::metrics::QueryTimer;

const COLUMNS: &str = "id, name, template_type, category, subject_template, body_template, variables, is_active, is_default, created_at, updated_at";

/// Repository for notification template database operations.
#[derive(Clone)]
pub struct NotificationTemplateRepository {
    pool: PgPool,
}

impl NotificationTemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationTemplateStore for NotificationTemplateRepository {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<NotificationTemplate>> {
        let timer = QueryTimer::new("find_notification_template_by_id");
        let result = sqlx::query_as::<_, NotificationTemplateEntity>(&format!(
            "SELECT {COLUMNS} FROM notification_templates WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        result
            .map_err(store_error)?
            .map(NotificationTemplate::try_from)
            .transpose()
    }

    async fn find_by_name_and_type(
        &self,
        name: &str,
        template_type: TemplateType,
    ) -> StoreResult<Option<NotificationTemplate>> {
        let timer = QueryTimer::new("find_notification_template_by_name");
        let result = sqlx::query_as::<_, NotificationTemplateEntity>(&format!(
            "SELECT {COLUMNS} FROM notification_templates WHERE name = $1 AND template_type = $2"
        ))
        .bind(name)
        .bind(template_type.as_str())
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        result
            .map_err(store_error)?
            .map(NotificationTemplate::try_from)
            .transpose()
    }

    async fn list(
        &self,
        filter: &NotificationTemplateFilter,
    ) -> StoreResult<Vec<NotificationTemplate>> {
        let timer = QueryTimer::new("list_notification_templates");
        let result = sqlx::query_as::<_, NotificationTemplateEntity>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM notification_templates
            WHERE ($1::text IS NULL OR template_type = $1)
              AND ($2::text IS NULL OR category = $2)
            ORDER BY name ASC, template_type ASC
            "#
        ))
        .bind(filter.template_type.map(|t| t.as_str()))
        .bind(filter.category.as_deref())
        .fetch_all(&self.pool)
        .await;
        timer.record();

        result
            .map_err(store_error)?
            .into_iter()
            .map(NotificationTemplate::try_from)
            .collect()
    }

    async fn create(&self, template: NewNotificationTemplate) -> StoreResult<NotificationTemplate> {
        let timer = QueryTimer::new("create_notification_template");
        let result = sqlx::query_as::<_, NotificationTemplateEntity>(&format!(
            r#"
            INSERT INTO notification_templates
                (name, template_type, category, subject_template, body_template, variables, is_active, is_default)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&template.name)
        .bind(template.template_type.as_str())
        .bind(&template.category)
        .bind(&template.subject_template)
        .bind(&template.body_template)
        .bind(&template.variables)
        .bind(template.is_active)
        .bind(template.is_default)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        result.map_err(store_error)?.try_into()
    }

    async fn update(&self, template: &NotificationTemplate) -> StoreResult<NotificationTemplate> {
        let timer = QueryTimer::new("update_notification_template");
        let result = sqlx::query_as::<_, NotificationTemplateEntity>(&format!(
            r#"
            UPDATE notification_templates
            SET
                name = $2,
                template_type = $3,
                category = $4,
                subject_template = $5,
                body_template = $6,
                variables = $7,
                is_active = $8,
                is_default = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(template.id)
        .bind(&template.name)
        .bind(template.template_type.as_str())
        .bind(&template.category)
        .bind(&template.subject_template)
        .bind(&template.body_template)
        .bind(&template.variables)
        .bind(template.is_active)
        .bind(template.is_default)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        result
            .map_err(store_error)?
            .ok_or_else(|| StoreError::NotFound {
                entity: "Notification template",
                id: template.id.to_string(),
            })?
            .try_into()
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let timer = QueryTimer::new("delete_notification_template");
        let result = sqlx::query("DELETE FROM notification_templates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();

        Ok(result.map_err(store_error)?.rows_affected() > 0)
    }
}
