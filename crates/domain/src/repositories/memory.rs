//! In-memory store implementations.
//!
//! Rows are kept in insertion order behind a `tokio::sync::RwLock`. Unique
//! constraints are checked under the write lock, so they hold under
//! concurrent callers the same way a database constraint would.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    ContentBlockStore, EmailTemplateStore, NotificationTemplateStore, StoreError, StoreResult,
};
use crate::models::{
    ContentBlock, EmailTemplate, NewContentBlock, NewEmailTemplate, NewNotificationTemplate,
    NotificationTemplate, NotificationTemplateFilter, TemplateType,
};

#[derive(Debug, Default)]
pub struct InMemoryContentBlockStore {
    rows: RwLock<Vec<ContentBlock>>,
}

impl InMemoryContentBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl ContentBlockStore for InMemoryContentBlockStore {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<ContentBlock>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|b| b.id == id).cloned())
    }

    async fn find_by_key(
        &self,
        key: &str,
        category: Option<&str>,
    ) -> StoreResult<Option<ContentBlock>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|b| b.key == key && category.map_or(true, |c| b.category == c))
            .cloned())
    }

    async fn list(&self, category: Option<&str>) -> StoreResult<Vec<ContentBlock>> {
        let rows = self.rows.read().await;
        let mut blocks: Vec<ContentBlock> = rows
            .iter()
            .filter(|b| category.map_or(true, |c| b.category == c))
            .cloned()
            .collect();
        blocks.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(blocks)
    }

    async fn create(&self, block: NewContentBlock) -> StoreResult<ContentBlock> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|b| b.key == block.key) {
            return Err(StoreError::Conflict(format!(
                "content block key '{}'",
                block.key
            )));
        }

        let now = Utc::now();
        let created = ContentBlock {
            id: Uuid::new_v4(),
            key: block.key,
            category: block.category,
            title: block.title,
            html_content: block.html_content,
            description: block.description,
            variables: block.variables,
            created_at: now,
            updated_at: now,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, block: &ContentBlock) -> StoreResult<ContentBlock> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|b| b.key == block.key && b.id != block.id) {
            return Err(StoreError::Conflict(format!(
                "content block key '{}'",
                block.key
            )));
        }

        let row = rows
            .iter_mut()
            .find(|b| b.id == block.id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "Content block",
                id: block.id.to_string(),
            })?;

        let created_at = row.created_at;
        *row = block.clone();
        row.created_at = created_at;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|b| b.id != id);
        Ok(rows.len() != before)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryEmailTemplateStore {
    rows: RwLock<Vec<EmailTemplate>>,
}

impl InMemoryEmailTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl EmailTemplateStore for InMemoryEmailTemplateStore {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<EmailTemplate>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<EmailTemplate>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|t| t.name == name).cloned())
    }

    async fn search(
        &self,
        skip: u32,
        limit: u32,
        search: Option<&str>,
    ) -> StoreResult<(Vec<EmailTemplate>, u64)> {
        let rows = self.rows.read().await;
        let needle = search.map(str::to_lowercase);
        let matching: Vec<&EmailTemplate> = rows
            .iter()
            .filter(|t| {
                needle
                    .as_deref()
                    .map_or(true, |n| t.name.to_lowercase().contains(n))
            })
            .collect();

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn create(&self, template: NewEmailTemplate) -> StoreResult<EmailTemplate> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|t| t.name == template.name) {
            return Err(StoreError::Conflict(format!(
                "email template name '{}'",
                template.name
            )));
        }

        let now = Utc::now();
        let created = EmailTemplate {
            id: Uuid::new_v4(),
            name: template.name,
            category: template.category,
            subject_template: template.subject_template,
            body_html: template.body_html,
            variables: template.variables,
            is_active: template.is_active,
            created_at: now,
            updated_at: now,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, template: &EmailTemplate) -> StoreResult<EmailTemplate> {
        let mut rows = self.rows.write().await;
        if rows
            .iter()
            .any(|t| t.name == template.name && t.id != template.id)
        {
            return Err(StoreError::Conflict(format!(
                "email template name '{}'",
                template.name
            )));
        }

        let row = rows
            .iter_mut()
            .find(|t| t.id == template.id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "Email template",
                id: template.id.to_string(),
            })?;

        let created_at = row.created_at;
        *row = template.clone();
        row.created_at = created_at;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|t| t.id != id);
        Ok(rows.len() != before)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryNotificationTemplateStore {
    rows: RwLock<Vec<NotificationTemplate>>,
}

impl InMemoryNotificationTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

fn same_identity(t: &NotificationTemplate, name: &str, template_type: TemplateType) -> bool {
    t.name == name && t.template_type == template_type
}

#[async_trait]
impl NotificationTemplateStore for InMemoryNotificationTemplateStore {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<NotificationTemplate>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_name_and_type(
        &self,
        name: &str,
        template_type: TemplateType,
    ) -> StoreResult<Option<NotificationTemplate>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|t| same_identity(t, name, template_type))
            .cloned())
    }

    async fn list(
        &self,
        filter: &NotificationTemplateFilter,
    ) -> StoreResult<Vec<NotificationTemplate>> {
        let rows = self.rows.read().await;
        let mut templates: Vec<NotificationTemplate> = rows
            .iter()
            .filter(|t| filter.template_type.map_or(true, |tt| t.template_type == tt))
            .filter(|t| {
                filter
                    .category
                    .as_deref()
                    .map_or(true, |c| t.category == c)
            })
            .cloned()
            .collect();
        templates.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.template_type.as_str().cmp(b.template_type.as_str()))
        });
        Ok(templates)
    }

    async fn create(&self, template: NewNotificationTemplate) -> StoreResult<NotificationTemplate> {
        let mut rows = self.rows.write().await;
        if rows
            .iter()
            .any(|t| same_identity(t, &template.name, template.template_type))
        {
            return Err(StoreError::Conflict(format!(
                "notification template '{}' ({})",
                template.name, template.template_type
            )));
        }

        let now = Utc::now();
        let created = NotificationTemplate {
            id: Uuid::new_v4(),
            name: template.name,
            template_type: template.template_type,
            category: template.category,
            subject_template: template.subject_template,
            body_template: template.body_template,
            variables: template.variables,
            is_active: template.is_active,
            is_default: template.is_default,
            created_at: now,
            updated_at: now,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, template: &NotificationTemplate) -> StoreResult<NotificationTemplate> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|t| {
            same_identity(t, &template.name, template.template_type) && t.id != template.id
        }) {
            return Err(StoreError::Conflict(format!(
                "notification template '{}' ({})",
                template.name, template.template_type
            )));
        }

        let row = rows
            .iter_mut()
            .find(|t| t.id == template.id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "Notification template",
                id: template.id.to_string(),
            })?;

        let created_at = row.created_at;
        *row = template.clone();
        row.created_at = created_at;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|t| t.id != id);
        Ok(rows.len() != before)
    }
}
