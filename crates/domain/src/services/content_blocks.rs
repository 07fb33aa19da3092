//! Content block administration and default seeding.

use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use super::template_variables::undeclared_placeholders;
use super::{BatchFailure, Seeded};
use crate::error::{DomainError, DomainResult, ValidationError};
use crate::models::{
    normalize_category, ContentBlock, CreateContentBlockRequest, NewContentBlock, TermsOfService,
    UpdateContentBlockRequest,
};
use crate::repositories::ContentBlockStore;
use crate::seeds::{ContentBlockSeed, SeedSource};

/// Key of the terms of service block served publicly.
pub const TERMS_OF_SERVICE_KEY: &str = "terms_of_service";

const ENTITY: &str = "Content block";

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    shared::validation::trimmed_non_empty(value)
        .map(str::to_string)
        .ok_or(ValidationError::MissingField { field })
}

fn non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if shared::validation::is_blank(value) {
        Err(ValidationError::EmptyValue { field })
    } else {
        Ok(())
    }
}

#[derive(Clone)]
pub struct ContentBlockService {
    store: Arc<dyn ContentBlockStore>,
    seeds: Arc<dyn SeedSource>,
}

impl ContentBlockService {
    pub fn new(store: Arc<dyn ContentBlockStore>, seeds: Arc<dyn SeedSource>) -> Self {
        Self { store, seeds }
    }

    /// Checks a create payload and returns the row to insert.
    ///
    /// Key and title are stored trimmed; the category is normalized.
    pub async fn validate_create(
        &self,
        request: CreateContentBlockRequest,
    ) -> DomainResult<NewContentBlock> {
        let key = required("key", &request.key)?;
        let title = required("title", &request.title)?;
        required("html_content", &request.html_content)?;

        if self.store.find_by_key(&key, None).await?.is_some() {
            return Err(ValidationError::DuplicateKey { entity: ENTITY, key }.into());
        }

        Ok(NewContentBlock {
            key,
            category: normalize_category(request.category.as_deref()),
            title,
            html_content: request.html_content,
            description: request.description,
            variables: request.variables,
        })
    }

    /// Checks a patch against the existing row and returns it normalized.
    pub async fn validate_update(
        &self,
        existing: &ContentBlock,
        mut patch: UpdateContentBlockRequest,
    ) -> DomainResult<UpdateContentBlockRequest> {
        if let Some(key) = patch.key.as_deref() {
            let key = shared::validation::trimmed_non_empty(key)
                .ok_or(ValidationError::EmptyValue { field: "key" })?
                .to_string();
            if key != existing.key {
                if let Some(other) = self.store.find_by_key(&key, None).await? {
                    if other.id != existing.id {
                        return Err(ValidationError::DuplicateKey { entity: ENTITY, key }.into());
                    }
                }
            }
            patch.key = Some(key);
        }
        if let Some(title) = patch.title.as_deref() {
            let title = shared::validation::trimmed_non_empty(title)
                .ok_or(ValidationError::EmptyValue { field: "title" })?
                .to_string();
            patch.title = Some(title);
        }
        if let Some(html) = patch.html_content.as_deref() {
            non_empty("html_content", html)?;
        }
        if let Some(category) = patch.category.take() {
            patch.category = Some(normalize_category(Some(&category)));
        }

        Ok(patch)
    }

    pub async fn list_blocks(&self, category: Option<&str>) -> DomainResult<Vec<ContentBlock>> {
        Ok(self.store.list(category).await?)
    }

    pub async fn get_block(&self, id: Uuid) -> DomainResult<ContentBlock> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    pub async fn get_block_by_key(
        &self,
        key: &str,
        category: Option<&str>,
    ) -> DomainResult<Option<ContentBlock>> {
        Ok(self.store.find_by_key(key, category).await?)
    }

    pub async fn create_block(&self, request: CreateContentBlockRequest) -> DomainResult<ContentBlock> {
        let new_block = self.validate_create(request).await?;
        hint_undeclared(&new_block.key, &new_block.html_content, &new_block.variables);

        let block = self.store.create(new_block).await?;
        info!(block_id = %block.id, key = %block.key, category = %block.category, "Content block created");
        Ok(block)
    }

    pub async fn update_block(
        &self,
        id: Uuid,
        patch: UpdateContentBlockRequest,
    ) -> DomainResult<ContentBlock> {
        let mut block = self.get_block(id).await?;
        let patch = self.validate_update(&block, patch).await?;
        block.apply(patch);
        hint_undeclared(&block.key, &block.html_content, &block.variables);

        let block = self.store.update(&block).await?;
        info!(block_id = %block.id, key = %block.key, "Content block updated");
        Ok(block)
    }

    pub async fn delete_block(&self, id: Uuid) -> DomainResult<()> {
        if !self.store.delete(id).await? {
            return Err(DomainError::not_found(ENTITY, id));
        }
        info!(block_id = %id, "Content block deleted");
        Ok(())
    }

    /// Loads the shipped defaults. An empty list is a packaging defect.
    pub fn default_blocks(&self) -> DomainResult<Vec<ContentBlockSeed>> {
        let blocks = self.seeds.load_default_content_blocks()?;
        if blocks.is_empty() {
            return Err(DomainError::Configuration(
                "default content blocks missing (content_blocks/defaults.json)".to_string(),
            ));
        }
        Ok(blocks)
    }

    /// Creates every default block whose key is not stored yet. Existing
    /// blocks are left alone. Returns only the created rows.
    pub async fn import_missing_defaults(&self) -> DomainResult<Vec<ContentBlock>> {
        let mut created = Vec::new();
        for seed in self.default_blocks()? {
            if self.store.find_by_key(&seed.key, None).await?.is_none() {
                let block = self.store.create(seed.to_new()).await?;
                info!(key = %block.key, "Imported default content block");
                created.push(block);
            }
        }
        Ok(created)
    }

    /// Creates or overwrites the stored block for one default seed.
    async fn ensure_seed(&self, seed: &ContentBlockSeed) -> DomainResult<Seeded<ContentBlock>> {
        match self.store.find_by_key(&seed.key, None).await? {
            Some(mut existing) => {
                existing.category = seed.category.clone();
                existing.title = seed.title.clone();
                existing.html_content = seed.html_content.clone();
                existing.description = seed.description.clone();
                existing.variables = seed.variables.clone();

                let block = self.store.update(&existing).await?;
                info!(key = %block.key, outcome = "updated", "Ensured default content block");
                Ok(Seeded::updated(block))
            }
            None => {
                let block = self.store.create(seed.to_new()).await?;
                info!(key = %block.key, outcome = "created", "Ensured default content block");
                Ok(Seeded::created(block))
            }
        }
    }

    /// Converges the block with `key` to its shipped default.
    pub async fn ensure_default(&self, key: &str) -> DomainResult<Seeded<ContentBlock>> {
        let seed = self
            .default_blocks()?
            .into_iter()
            .find(|seed| seed.key == key)
            .ok_or_else(|| DomainError::not_found("Default content block", key))?;
        self.ensure_seed(&seed).await
    }

    pub async fn ensure_terms_default(&self) -> DomainResult<ContentBlock> {
        let seeds = self.default_blocks()?;
        let seed = seeds
            .iter()
            .find(|seed| seed.key == TERMS_OF_SERVICE_KEY)
            .ok_or_else(|| {
                DomainError::Configuration(format!(
                    "default content block '{}' missing",
                    TERMS_OF_SERVICE_KEY
                ))
            })?;
        Ok(self.ensure_seed(seed).await?.entity)
    }

    /// Ensures every default block in file order, stopping at the first failure.
    pub async fn ensure_all_defaults(
        &self,
    ) -> Result<Vec<Seeded<ContentBlock>>, BatchFailure<ContentBlock>> {
        let seeds = self
            .default_blocks()
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

    /// Public terms of service. A missing or blank block is restored from
    /// the shipped default first.
    pub async fn terms_of_service(&self) -> DomainResult<TermsOfService> {
        let stored = self.store.find_by_key(TERMS_OF_SERVICE_KEY, None).await?;
        let block = match stored {
            Some(block) if !shared::validation::is_blank(&block.html_content) => block,
            _ => {
                info!("Terms of service missing or empty, restoring default");
                self.ensure_terms_default().await?
            }
        };
        Ok(block.into())
    }
}

fn hint_undeclared(key: &str, body: &str, declared: &[String]) {
    let undeclared = undeclared_placeholders(body, declared);
    if !undeclared.is_empty() {
        debug!(key = %key, undeclared = ?undeclared, "Content block references undeclared placeholders");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryContentBlockStore;
    use crate::services::fixtures;
    use crate::services::SeedOutcome;
    use crate::seeds::StaticSeedSource;

    fn service() -> (ContentBlockService, Arc<InMemoryContentBlockStore>) {
        let store = Arc::new(InMemoryContentBlockStore::new());
        let service = ContentBlockService::new(store.clone(), Arc::new(fixtures::seed_source()));
        (service, store)
    }

    fn create_request(key: &str) -> CreateContentBlockRequest {
        CreateContentBlockRequest {
            key: key.to_string(),
            title: "Dashboard welcome".to_string(),
            html_content: "<p>Welcome {user_name}</p>".to_string(),
            variables: vec!["user_name".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_trims_key_and_defaults_category() {
        let (service, _) = service();
        let mut req = create_request("  dashboard_welcome ");
        req.category = Some("   ".to_string());

        let block = service.create_block(req).await.unwrap();
        assert_eq!(block.key, "dashboard_welcome");
        assert_eq!(block.category, "content");
    }

    #[tokio::test]
    async fn test_create_requires_fields() {
        let (service, store) = service();

        let mut req = create_request("welcome");
        req.title = "  ".to_string();
        let err = service.create_block(req).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::MissingField { field: "title" })
        ));

        let mut req = create_request("welcome");
        req.html_content = String::new();
        let err = service.create_block(req).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::MissingField { field: "html_content" })
        ));

        let err = service.create_block(create_request("")).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::MissingField { field: "key" })
        ));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_duplicate_key_rejected() {
        let (service, store) = service();
        service.create_block(create_request("welcome")).await.unwrap();

        let err = service.create_block(create_request("welcome")).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::DuplicateKey { .. })
        ));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_to_taken_key_rejected() {
        let (service, _) = service();
        service.create_block(create_request("first")).await.unwrap();
        let second = service.create_block(create_request("second")).await.unwrap();

        let err = service
            .update_block(
                second.id,
                UpdateContentBlockRequest {
                    key: Some("first".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_duplicate());

        let unchanged = service.get_block(second.id).await.unwrap();
        assert_eq!(unchanged.key, "second");
    }

    #[tokio::test]
    async fn test_update_keeping_own_key_is_allowed() {
        let (service, _) = service();
        let block = service.create_block(create_request("welcome")).await.unwrap();

        let updated = service
            .update_block(
                block.id,
                UpdateContentBlockRequest {
                    key: Some("welcome".to_string()),
                    title: Some("New title".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "New title");
        assert_eq!(updated.id, block.id);
    }

    #[tokio::test]
    async fn test_update_rejects_present_empty_values() {
        let (service, _) = service();
        let block = service.create_block(create_request("welcome")).await.unwrap();

        let err = service
            .update_block(
                block.id,
                UpdateContentBlockRequest {
                    html_content: Some("   ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::EmptyValue { field: "html_content" })
        ));

        let err = service
            .update_block(
                block.id,
                UpdateContentBlockRequest {
                    key: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::EmptyValue { field: "key" })
        ));
    }

    #[tokio::test]
    async fn test_update_normalizes_blank_category() {
        let (service, _) = service();
        let mut req = create_request("tour");
        req.category = Some("product_tour".to_string());
        let block = service.create_block(req).await.unwrap();

        let updated = service
            .update_block(
                block.id,
                UpdateContentBlockRequest {
                    category: Some(" ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.category, "content");
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_block() {
        let (service, _) = service();
        let id = Uuid::new_v4();

        let err = service
            .update_block(id, UpdateContentBlockRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let err = service.delete_block(id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_ensure_terms_default_is_idempotent_overwrite() {
        let (service, store) = service();

        let first = service.ensure_terms_default().await.unwrap();
        let second = service.ensure_terms_default().await.unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);
        assert_eq!(first.html_content, second.html_content);
        assert_eq!(first.title, second.title);
        assert_eq!(first.variables, second.variables);
    }

    #[tokio::test]
    async fn test_ensure_default_reports_update_on_second_call() {
        let (service, _) = service();

        let first = service.ensure_default(TERMS_OF_SERVICE_KEY).await.unwrap();
        assert_eq!(first.outcome, SeedOutcome::Created);

        let second = service.ensure_default(TERMS_OF_SERVICE_KEY).await.unwrap();
        assert_eq!(second.outcome, SeedOutcome::Updated);
        assert_eq!(second.entity.id, first.entity.id);
    }

    #[tokio::test]
    async fn test_ensure_default_overwrites_admin_edits() {
        let (service, _) = service();
        let seeded = service.ensure_terms_default().await.unwrap();

        service
            .update_block(
                seeded.id,
                UpdateContentBlockRequest {
                    title: Some("Edited".to_string()),
                    html_content: Some("Edited body".to_string()),
                    description: Some(Some("edited".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let restored = service.ensure_terms_default().await.unwrap();
        assert_eq!(restored.id, seeded.id);
        assert_eq!(restored.title, seeded.title);
        assert_eq!(restored.html_content, seeded.html_content);
        assert_eq!(restored.description, seeded.description);
    }

    #[tokio::test]
    async fn test_ensure_default_unknown_key() {
        let (service, _) = service();
        let err = service.ensure_default("not_a_default").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_import_missing_defaults_is_create_only() {
        let (service, _) = service();
        let existing = service.create_block(create_request(TERMS_OF_SERVICE_KEY)).await.unwrap();

        let created = service.import_missing_defaults().await.unwrap();
        let keys: Vec<&str> = created.iter().map(|b| b.key.as_str()).collect();
        assert!(!keys.contains(&TERMS_OF_SERVICE_KEY));
        assert_eq!(created.len(), fixtures::seed_source().load_default_content_blocks().unwrap().len() - 1);

        let untouched = service.get_block(existing.id).await.unwrap();
        assert_eq!(untouched.title, existing.title);

        assert!(service.import_missing_defaults().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ensure_all_defaults_in_file_order() {
        let (service, store) = service();
        let seeds = fixtures::seed_source().load_default_content_blocks().unwrap();

        let results = service.ensure_all_defaults().await.unwrap();
        let keys: Vec<&str> = results.iter().map(|s| s.entity.key.as_str()).collect();
        let expected: Vec<&str> = seeds.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, expected);
        assert_eq!(store.len().await, seeds.len());

        let again = service.ensure_all_defaults().await.unwrap();
        assert!(again.iter().all(|s| s.outcome == SeedOutcome::Updated));
        assert_eq!(store.len().await, seeds.len());
    }

    #[tokio::test]
    async fn test_empty_default_list_is_configuration_fault() {
        let store = Arc::new(InMemoryContentBlockStore::new());
        let service = ContentBlockService::new(store, Arc::new(StaticSeedSource::new()));

        let err = service.import_missing_defaults().await.unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));

        let failure = service.ensure_all_defaults().await.unwrap_err();
        assert!(failure.completed.is_empty());
        assert!(matches!(failure.error, DomainError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_terms_of_service_auto_heals() {
        let (service, _) = service();

        let tos = service.terms_of_service().await.unwrap();
        assert!(tos.content_md.contains("Terms of Service"));

        let stored = service
            .get_block_by_key(TERMS_OF_SERVICE_KEY, None)
            .await
            .unwrap()
            .unwrap();
        service
            .update_block(
                stored.id,
                UpdateContentBlockRequest {
                    html_content: Some("placeholder".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // A non-blank admin edit is served as-is.
        let tos = service.terms_of_service().await.unwrap();
        assert_eq!(tos.content_md, "placeholder");
    }

    #[tokio::test]
    async fn test_get_block_by_key_respects_category() {
        let (service, _) = service();
        service.ensure_all_defaults().await.unwrap();

        assert!(service
            .get_block_by_key("signal_scoring_tour", Some("product_tour"))
            .await
            .unwrap()
            .is_some());
        assert!(service
            .get_block_by_key("signal_scoring_tour", Some("content"))
            .await
            .unwrap()
            .is_none());

        let tours = service.list_blocks(Some("product_tour")).await.unwrap();
        assert_eq!(tours.len(), 1);
    }
}
