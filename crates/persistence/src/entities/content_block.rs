//! Content block entity for database operations.

use chrono::{DateTime, Utc};
use domain::models::ContentBlock;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row of `service_cms_blocks`.
#[derive(Debug, Clone, FromRow)]
pub struct ContentBlockEntity {
    pub id: Uuid,
    pub key: String,
    pub category: String,
    pub title: String,
    pub html_content: String,
    pub description: Option<String>,
    pub variables: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ContentBlockEntity> for ContentBlock {
    fn from(entity: ContentBlockEntity) -> Self {
        ContentBlock {
            id: entity.id,
            key: entity.key,
            category: entity.category,
            title: entity.title,
            html_content: entity.html_content,
            description: entity.description,
            variables: entity.variables,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::lorem::en::{Paragraph, Sentence};
    use fake::Fake;

    #[test]
    fn test_content_block_entity_to_domain() {
        let now = Utc::now();
        let entity = ContentBlockEntity {
            id: Uuid::new_v4(),
            key: "terms_of_service".to_string(),
            category: "content".to_string(),
            title: Sentence(2..4).fake(),
            html_content: Paragraph(1..3).fake(),
            description: None,
            variables: vec![],
            created_at: now,
            updated_at: now,
        };

        let block: ContentBlock = entity.clone().into();
        assert_eq!(block.id, entity.id);
        assert_eq!(block.key, "terms_of_service");
        assert_eq!(block.title, entity.title);
        assert_eq!(block.html_content, entity.html_content);
    }
}
