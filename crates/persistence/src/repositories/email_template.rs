//! Email template repository for database operations.

use async_trait::async_trait;
use domain::models::{EmailTemplate, NewEmailTemplate};
use domain::repositories::{EmailTemplateStore, StoreError, StoreResult};
use sqlx::PgPool;
use uuid::Uuid;

use super::store_error;
use crate::entities::EmailTemplateEntity;
use crate::metrics::QueryTimer;

const COLUMNS: &str = "id, name, category, subject_template, body_html, variables, is_active, created_at, updated_at";

/// Repository for email template database operations.
#[derive(Clone)]
pub struct EmailTemplateRepository {
    pool: PgPool,
}

impl EmailTemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmailTemplateStore for EmailTemplateRepository {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<EmailTemplate>> {
        let timer = QueryTimer::new("find_email_template_by_id");
        let result = sqlx::query_as::<_, EmailTemplateEntity>(&format!(
            "SELECT {COLUMNS} FROM service_email_templates WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(result.map_err(store_error)?.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<EmailTemplate>> {
        let timer = QueryTimer::new("find_email_template_by_name");
        let result = sqlx::query_as::<_, EmailTemplateEntity>(&format!(
            "SELECT {COLUMNS} FROM service_email_templates WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(result.map_err(store_error)?.map(Into::into))
    }

    async fn search(
        &self,
        skip: u32,
        limit: u32,
        search: Option<&str>,
    ) -> StoreResult<(Vec<EmailTemplate>, u64)> {
        let timer = QueryTimer::new("search_email_templates");

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM service_email_templates
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
            "#,
        )
        .bind(search)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        let entities = sqlx::query_as::<_, EmailTemplateEntity>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM service_email_templates
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
            ORDER BY created_at ASC, id ASC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(search)
        .bind(i64::from(limit))
        .bind(i64::from(skip))
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;
        timer.record();

        let templates = entities.into_iter().map(Into::into).collect();
        Ok((templates, total.max(0) as u64))
    }

    async fn create(&self, template: NewEmailTemplate) -> StoreResult<EmailTemplate> {
        let timer = QueryTimer::new("create_email_template");
        let result = sqlx::query_as::<_, EmailTemplateEntity>(&format!(
            r#"
            INSERT INTO service_email_templates (name, category, subject_template, body_html, variables, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&template.name)
        .bind(&template.category)
        .bind(&template.subject_template)
        .bind(&template.body_html)
        .bind(&template.variables)
        .bind(template.is_active)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        Ok(result.map_err(store_error)?.into())
    }

    async fn update(&self, template: &EmailTemplate) -> StoreResult<EmailTemplate> {
        let timer = QueryTimer::new("update_email_template");
        let result = sqlx::query_as::<_, EmailTemplateEntity>(&format!(
            r#"
            UPDATE service_email_templates
            SET
                name = $2,
                category = $3,
                subject_template = $4,
                body_html = $5,
                variables = $6,
                is_active = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(template.id)
        .bind(&template.name)
        .bind(&template.category)
        .bind(&template.subject_template)
        .bind(&template.body_html)
        .bind(&template.variables)
        .bind(template.is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        result
            .map_err(store_error)?
            .map(Into::into)
            .ok_or_else(|| StoreError::NotFound {
                entity: "Email template",
                id: template.id.to_string(),
            })
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let timer = QueryTimer::new("delete_email_template");
        let result = sqlx::query("DELETE FROM service_email_templates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();

        Ok(result.map_err(store_error)?.rows_affected() > 0)
    }
}
