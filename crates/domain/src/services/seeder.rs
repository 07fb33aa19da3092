//! Runs every default batch in order and summarizes the outcome.

use serde::Serialize;
use tracing::{error, info};

use super::{
    ContentBlockService, EmailTemplateService, NotificationTemplateAdminService, SeedOutcome,
    Seeded,
};
use crate::error::DomainResult;

/// Outcome counts for one entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindReport {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
}

impl KindReport {
    pub fn from_results<T>(results: &[Seeded<T>]) -> Self {
        let mut report = KindReport::default();
        for seeded in results {
            match seeded.outcome {
                SeedOutcome::Created => report.created += 1,
                SeedOutcome::Updated => report.updated += 1,
                SeedOutcome::Skipped => report.skipped += 1,
            }
        }
        report
    }

    pub fn count(&self, outcome: SeedOutcome) -> usize {
        match outcome {
            SeedOutcome::Created => self.created,
            SeedOutcome::Updated => self.updated,
            SeedOutcome::Skipped => self.skipped,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub content_blocks: KindReport,
    pub email_templates: KindReport,
    pub notification_templates: KindReport,
}

impl SeedReport {
    /// Per-kind reports labelled for logs and metrics.
    pub fn kinds(&self) -> [(&'static str, KindReport); 3] {
        [
            ("content_block", self.content_blocks),
            ("email_template", self.email_templates),
            ("notification_template", self.notification_templates),
        ]
    }
}

/// Seeds content blocks, then email templates, then notification templates.
pub struct DefaultsSeeder {
    content_blocks: ContentBlockService,
    email_templates: EmailTemplateService,
    notification_templates: NotificationTemplateAdminService,
}

impl DefaultsSeeder {
    pub fn new(
        content_blocks: ContentBlockService,
        email_templates: EmailTemplateService,
        notification_templates: NotificationTemplateAdminService,
    ) -> Self {
        Self {
            content_blocks,
            email_templates,
            notification_templates,
        }
    }

    /// Stops at the first failing batch. Batches that already ran stay committed.
    pub async fn run(&self) -> DomainResult<SeedReport> {
        let mut report = SeedReport::default();

        let blocks = self.content_blocks.ensure_all_defaults().await.map_err(|failure| {
            error!(completed = failure.completed.len(), error = %failure.error, "Seeding content blocks failed");
            failure
        })?;
        report.content_blocks = KindReport::from_results(&blocks);

        let emails = self.email_templates.ensure_all_defaults().await.map_err(|failure| {
            error!(completed = failure.completed.len(), error = %failure.error, "Seeding email templates failed");
            failure
        })?;
        report.email_templates = KindReport::from_results(&emails);

        let notifications = self
            .notification_templates
            .ensure_all_defaults()
            .await
            .map_err(|failure| {
                error!(completed = failure.completed.len(), error = %failure.error, "Seeding notification templates failed");
                failure
            })?;
        report.notification_templates = KindReport::from_results(&notifications);

        for (kind, counts) in report.kinds() {
            info!(
                kind,
                created = counts.created,
                updated = counts.updated,
                skipped = counts.skipped,
                "Seeded defaults"
            );
        }

        Ok(report)
    }
}
