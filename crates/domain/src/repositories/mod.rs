//! Persistence port for CMS entities.
//!
//! One trait per entity kind. Implementations enforce the unique constraints
//! atomically and report violations as [`StoreError::Conflict`]. The
//! PostgreSQL implementation lives in the `persistence` crate; [`memory`]
//! provides an in-process one.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    ContentBlock, EmailTemplate, NewContentBlock, NewEmailTemplate, NewNotificationTemplate,
    NotificationTemplate, NotificationTemplateFilter, TemplateType,
};

pub use memory::{
    InMemoryContentBlockStore, InMemoryEmailTemplateStore, InMemoryNotificationTemplateStore,
};

/// Failure reported by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    /// The row to update no longer exists.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Content block storage. `key` is unique.
#[async_trait]
pub trait ContentBlockStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<ContentBlock>>;

    /// Finds a block by key, optionally requiring a category.
    async fn find_by_key(
        &self,
        key: &str,
        category: Option<&str>,
    ) -> StoreResult<Option<ContentBlock>>;

    /// Lists blocks ordered by key, optionally restricted to one category.
    async fn list(&self, category: Option<&str>) -> StoreResult<Vec<ContentBlock>>;

    async fn create(&self, block: NewContentBlock) -> StoreResult<ContentBlock>;

    /// Persists every mutable field of `block`. `id` and `created_at` are kept.
    async fn update(&self, block: &ContentBlock) -> StoreResult<ContentBlock>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}

/// Email template storage. `name` is unique.
#[async_trait]
pub trait EmailTemplateStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<EmailTemplate>>;

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<EmailTemplate>>;

    /// Returns one page ordered by creation together with the total match count.
    async fn search(
        &self,
        skip: u32,
        limit: u32,
        search: Option<&str>,
    ) -> StoreResult<(Vec<EmailTemplate>, u64)>;

    async fn create(&self, template: NewEmailTemplate) -> StoreResult<EmailTemplate>;

    async fn update(&self, template: &EmailTemplate) -> StoreResult<EmailTemplate>;

    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}

/// Notification template storage. `(name, template_type)` is unique.
#[async_trait]
pub trait NotificationTemplateStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<NotificationTemplate>>;

    async fn find_by_name_and_type(
        &self,
        name: &str,
        template_type: TemplateType,
    ) -> StoreResult<Option<NotificationTemplate>>;

    async fn list(
        &self,
        filter: &NotificationTemplateFilter,
    ) -> StoreResult<Vec<NotificationTemplate>>;

    async fn create(&self, template: NewNotificationTemplate) -> StoreResult<NotificationTemplate>;

    async fn update(&self, template: &NotificationTemplate) -> StoreResult<NotificationTemplate>;

    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}
