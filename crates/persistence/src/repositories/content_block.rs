//! Content block repository for database operations.

use async_trait::async_trait;
use domain::models::{ContentBlock, NewContentBlock};
use domain::repositories::{ContentBlockStore, StoreError, StoreResult};
use sqlx::PgPool;
use uuid::Uuid;

use super::store_error;
use crate::entities::ContentBlockEntity;
use crate::metrics::QueryTimer;

const COLUMNS: &str =
    "id, key, category, title, html_content, description, variables, created_at, updated_at";

/// Repository for content block database operations.
#[derive(Clone)]
pub struct ContentBlockRepository {
    pool: PgPool,
}

impl ContentBlockRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentBlockStore for ContentBlockRepository {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<ContentBlock>> {
        let timer = QueryTimer::new("find_content_block_by_id");
        let result = sqlx::query_as::<_, ContentBlockEntity>(&format!(
            "SELECT {COLUMNS} FROM service_cms_blocks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(result.map_err(store_error)?.map(Into::into))
    }

    async fn find_by_key(
        &self,
        key: &str,
        category: Option<&str>,
    ) -> StoreResult<Option<ContentBlock>> {
        let timer = QueryTimer::new("find_content_block_by_key");
        let result = sqlx::query_as::<_, ContentBlockEntity>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM service_cms_blocks
            WHERE key = $1 AND ($2::text IS NULL OR category = $2)
            "#
        ))
        .bind(key)
        .bind(category)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(result.map_err(store_error)?.map(Into::into))
    }

    async fn list(&self, category: Option<&str>) -> StoreResult<Vec<ContentBlock>> {
        let timer = QueryTimer::new("list_content_blocks");
        let result = sqlx::query_as::<_, ContentBlockEntity>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM service_cms_blocks
            WHERE ($1::text IS NULL OR category = $1)
            ORDER BY key ASC
            "#
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await;
        timer.record();

        Ok(result
            .map_err(store_error)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn create(&self, block: NewContentBlock) -> StoreResult<ContentBlock> {
        let timer = QueryTimer::new("create_content_block");
        let result = sqlx::query_as::<_, ContentBlockEntity>(&format!(
            r#"
            INSERT INTO service_cms_blocks (key, category, title, html_content, description, variables)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&block.key)
        .bind(&block.category)
        .bind(&block.title)
        .bind(&block.html_content)
        .bind(&block.description)
        .bind(&block.variables)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        Ok(result.map_err(store_error)?.into())
    }

    async fn update(&self, block: &ContentBlock) -> StoreResult<ContentBlock> {
        let timer = QueryTimer::new("update_content_block");
        let result = sqlx::query_as::<_, ContentBlockEntity>(&format!(
            r#"
            UPDATE service_cms_blocks
            SET
                key = $2,
                category = $3,
                title = $4,
                html_content = $5,
                description = $6,
                variables = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(block.id)
        .bind(&block.key)
        .bind(&block.category)
        .bind(&block.title)
        .bind(&block.html_content)
        .bind(&block.description)
        .bind(&block.variables)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        result
            .map_err(store_error)?
            .map(Into::into)
            .ok_or_else(|| StoreError::NotFound {
                entity: "Content block",
                id: block.id.to_string(),
            })
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let timer = QueryTimer::new("delete_content_block");
        let result = sqlx::query("DELETE FROM service_cms_blocks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();

        Ok(result.map_err(store_error)?.rows_affected() > 0)
    }
}
