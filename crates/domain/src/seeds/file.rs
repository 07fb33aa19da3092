//! Seed source backed by a directory of JSON and HTML files.
//!
//! Layout under the root directory:
//!
//! ```text
//! content_blocks/defaults.json        [{key, category?, title, content_path, description?, variables?}]
//! notification_templates/defaults.json
//! email_templates/<template_id>.html  styled seeds containing __STYLE__
//! ```
//!
//! `content_path` is relative to the root.

use serde::Deserialize;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::{
    apply_style, ContentBlockSeed, NotificationTemplateSeed, SeedError, SeedSource,
};
use crate::models::normalize_category;

const CONTENT_BLOCKS_FILE: &str = "content_blocks/defaults.json";
const NOTIFICATION_TEMPLATES_FILE: &str = "notification_templates/defaults.json";
const EMAIL_TEMPLATES_DIR: &str = "email_templates";

#[derive(Debug, Deserialize)]
struct ContentBlockEntry {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content_path: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    variables: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct FileSeedSource {
    root: PathBuf,
}

impl FileSeedSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads a file relative to the root. Missing or blank files yield `None`.
    fn read_text(&self, rel_path: &str) -> Result<Option<String>, SeedError> {
        let path = self.root.join(rel_path);
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let trimmed = content.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(trimmed.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SeedError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Reads a defaults file and returns its object entries.
    fn read_entries(&self, rel_path: &str) -> Result<Vec<Value>, SeedError> {
        if !self.root.join(rel_path).exists() {
            return Err(SeedError::Missing {
                path: rel_path.to_string(),
            });
        }

        let Some(content) = self.read_text(rel_path)? else {
            return Ok(Vec::new());
        };

        let parsed: Value = serde_json::from_str(&content).map_err(|e| SeedError::Malformed {
            path: rel_path.to_string(),
            message: e.to_string(),
        })?;

        let Value::Array(items) = parsed else {
            return Err(SeedError::Malformed {
                path: rel_path.to_string(),
                message: "expected a JSON array".to_string(),
            });
        };

        Ok(items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| {
                if item.is_object() {
                    Some(item)
                } else {
                    warn!(file = rel_path, index, "Skipping non-object seed entry");
                    None
                }
            })
            .collect())
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .as_deref()
        .and_then(shared::validation::trimmed_non_empty)
        .map(str::to_string)
}

impl SeedSource for FileSeedSource {
    fn load_default_content_blocks(&self) -> Result<Vec<ContentBlockSeed>, SeedError> {
        let mut seeds = Vec::new();

        for (index, item) in self.read_entries(CONTENT_BLOCKS_FILE)?.into_iter().enumerate() {
            let entry: ContentBlockEntry = match serde_json::from_value(item) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(file = CONTENT_BLOCKS_FILE, index, error = %e, "Skipping unreadable content block seed");
                    continue;
                }
            };

            let Some(content_path) = trimmed(entry.content_path) else {
                warn!(index, "Skipping content block seed without content_path");
                continue;
            };
            let Some(html_content) = self.read_text(&content_path)? else {
                warn!(index, content_path = %content_path, "Skipping content block seed with missing or empty content");
                continue;
            };
            let (Some(key), Some(title)) = (trimmed(entry.key), trimmed(entry.title)) else {
                warn!(index, content_path = %content_path, "Skipping content block seed without key or title");
                continue;
            };

            seeds.push(ContentBlockSeed {
                key,
                category: normalize_category(entry.category.as_deref()),
                title,
                html_content,
                description: trimmed(entry.description),
                variables: entry.variables.unwrap_or_default(),
            });
        }

        Ok(seeds)
    }

    fn load_default_notification_templates(
        &self,
    ) -> Result<Vec<NotificationTemplateSeed>, SeedError> {
        let mut seeds = Vec::new();

        for (index, item) in self
            .read_entries(NOTIFICATION_TEMPLATES_FILE)?
            .into_iter()
            .enumerate()
        {
            match serde_json::from_value::<NotificationTemplateSeed>(item) {
                Ok(seed) => seeds.push(seed),
                Err(e) => {
                    warn!(file = NOTIFICATION_TEMPLATES_FILE, index, error = %e, "Skipping unreadable notification template seed");
                }
            }
        }

        Ok(seeds)
    }

    fn render_styled_template(
        &self,
        template_id: &str,
        style: &str,
    ) -> Result<Option<String>, SeedError> {
        let valid_id = !template_id.is_empty()
            && template_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid_id {
            return Err(SeedError::InvalidTemplateId(template_id.to_string()));
        }

        let rel_path = format!("{}/{}.html", EMAIL_TEMPLATES_DIR, template_id);
        Ok(self
            .read_text(&rel_path)?
            .and_then(|html| apply_style(&html, style)))
    }
}
