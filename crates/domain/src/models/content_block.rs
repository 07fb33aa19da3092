//! CMS content block domain model.
//!
//! Content blocks are admin-managed snippets (HTML or Markdown, depending on
//! category convention) looked up by a globally unique key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::patch::double_option;
use uuid::Uuid;
use validator::Validate;

/// Category assigned when none (or only whitespace) is given.
pub const DEFAULT_CATEGORY: &str = "content";

/// Trims a category and falls back to [`DEFAULT_CATEGORY`] when nothing is left.
pub fn normalize_category(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(category) if !category.is_empty() => category.to_string(),
        _ => DEFAULT_CATEGORY.to_string(),
    }
}

/// Content block domain model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ContentBlock {
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

/// A validated content block ready to be inserted. Identity is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContentBlock {
    pub key: String,
    pub category: String,
    pub title: String,
    pub html_content: String,
    pub description: Option<String>,
    pub variables: Vec<String>,
}

impl ContentBlock {
    /// Applies a validated patch. Absent fields are left unchanged.
    pub fn apply(&mut self, patch: UpdateContentBlockRequest) {
        if let Some(key) = patch.key {
            self.key = key;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(html_content) = patch.html_content {
            self.html_content = html_content;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(variables) = patch.variables {
            self.variables = variables;
        }
    }
}

/// Request to create a content block.
///
/// Required strings default to empty so that a missing field is reported
/// as a missing-field validation error rather than a decoding failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateContentBlockRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "Key must be at most 100 characters"))]
    pub key: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255, message = "Title must be at most 255 characters"))]
    pub title: String,
    #[serde(default)]
    pub html_content: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_variable_names"))]
    pub variables: Vec<String>,
}

/// Partial update of a content block.
///
/// `None` means "leave unchanged"; `Some("")` is a present empty value and is
/// validated as such. `description` distinguishes clearing (`null`) from
/// leaving it untouched (absent).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateContentBlockRequest {
    #[validate(length(max = 100, message = "Key must be at most 100 characters"))]
    pub key: Option<String>,
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,
    #[validate(length(max = 255, message = "Title must be at most 255 characters"))]
    pub title: Option<String>,
    pub html_content: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: Option<Option<String>>,
    #[validate(custom(function = "shared::validation::validate_variable_names"))]
    pub variables: Option<Vec<String>>,
}

/// Query parameters for listing or fetching blocks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentBlockQuery {
    pub category: Option<String>,
}

/// Public read model of a block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PublicContentBlock {
    pub key: String,
    pub category: String,
    pub title: String,
    pub html_content: String,
    pub updated_at: DateTime<Utc>,
}

impl From<ContentBlock> for PublicContentBlock {
    fn from(block: ContentBlock) -> Self {
        Self {
            key: block.key,
            category: block.category,
            title: block.title,
            html_content: block.html_content,
            updated_at: block.updated_at,
        }
    }
}

/// Public terms of service payload. The block body is stored as Markdown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TermsOfService {
    pub title: String,
    pub content_md: String,
    pub updated_at: DateTime<Utc>,
}

impl From<ContentBlock> for TermsOfService {
    fn from(block: ContentBlock) -> Self {
        Self {
            title: block.title,
            content_md: block.html_content,
            updated_at: block.updated_at,
        }
    }
}
