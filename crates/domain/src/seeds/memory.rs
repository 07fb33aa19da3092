//! In-memory seed source.

use std::collections::HashMap;

use super::{apply_style, ContentBlockSeed, NotificationTemplateSeed, SeedError, SeedSource};

/// Seed source holding its defaults in memory. Useful for tests and for
/// embedding a fixed set of defaults.
#[derive(Debug, Clone, Default)]
pub struct StaticSeedSource {
    content_blocks: Vec<ContentBlockSeed>,
    notification_templates: Vec<NotificationTemplateSeed>,
    styled_templates: HashMap<String, String>,
}

impl StaticSeedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content_block(mut self, seed: ContentBlockSeed) -> Self {
        self.content_blocks.push(seed);
        self
    }

    pub fn with_notification_template(mut self, seed: NotificationTemplateSeed) -> Self {
        self.notification_templates.push(seed);
        self
    }

    /// Registers a styled HTML seed. `html` may contain the style marker.
    pub fn with_styled_template(
        mut self,
        template_id: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        self.styled_templates.insert(template_id.into(), html.into());
        self
    }
}

impl SeedSource for StaticSeedSource {
    fn load_default_content_blocks(&self) -> Result<Vec<ContentBlockSeed>, SeedError> {
        Ok(self.content_blocks.clone())
    }

    fn load_default_notification_templates(
        &self,
    ) -> Result<Vec<NotificationTemplateSeed>, SeedError> {
        Ok(self.notification_templates.clone())
    }

    fn render_styled_template(
        &self,
        template_id: &str,
        style: &str,
    ) -> Result<Option<String>, SeedError> {
        Ok(self
            .styled_templates
            .get(template_id)
            .and_then(|html| apply_style(html, style)))
    }
}
