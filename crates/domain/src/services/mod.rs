//! Domain services for the CMS admin backend.
//!
//! Services validate input, talk to the persistence port and seed the
//! shipped defaults.

pub mod content_blocks;
pub mod email_templates;
pub mod notification_templates;
pub mod seeder;
pub mod template_variables;

#[cfg(test)]
pub(crate) mod fixtures;

use serde::Serialize;

use crate::error::DomainError;

pub use content_blocks::{ContentBlockService, TERMS_OF_SERVICE_KEY};
pub use email_templates::{
    DefaultContent, EmailTemplateDefault, EmailTemplateService, DEFAULT_EMAIL_TEMPLATES,
};
pub use notification_templates::NotificationTemplateAdminService;
pub use seeder::{DefaultsSeeder, KindReport, SeedReport};
pub use template_variables::{supported_variables, undeclared_placeholders};

/// What an ensure step did to the stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedOutcome {
    Created,
    /// The existing row was overwritten with the shipped default.
    Updated,
    /// The existing row was left untouched.
    Skipped,
}

impl SeedOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeedOutcome::Created => "created",
            SeedOutcome::Updated => "updated",
            SeedOutcome::Skipped => "skipped",
        }
    }
}

impl std::fmt::Display for SeedOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The row an ensure step ended with, and how it got there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Seeded<T> {
    pub entity: T,
    pub outcome: SeedOutcome,
}

impl<T> Seeded<T> {
    pub fn created(entity: T) -> Self {
        Self {
            entity,
            outcome: SeedOutcome::Created,
        }
    }

    pub fn updated(entity: T) -> Self {
        Self {
            entity,
            outcome: SeedOutcome::Updated,
        }
    }

    pub fn skipped(entity: T) -> Self {
        Self {
            entity,
            outcome: SeedOutcome::Skipped,
        }
    }
}

/// A batch that stopped at its first failing step.
///
/// Steps before the failure stay committed and are listed in `completed`.
#[derive(Debug)]
pub struct BatchFailure<T> {
    pub completed: Vec<Seeded<T>>,
    pub error: DomainError,
}

impl<T> BatchFailure<T> {
    pub fn new(completed: Vec<Seeded<T>>, error: DomainError) -> Self {
        Self { completed, error }
    }
}

impl<T> std::fmt::Display for BatchFailure<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "batch aborted after {} completed steps: {}",
            self.completed.len(),
            self.error
        )
    }
}

impl<T> From<BatchFailure<T>> for DomainError {
    fn from(failure: BatchFailure<T>) -> Self {
        failure.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_outcome_display() {
        assert_eq!(SeedOutcome::Created.to_string(), "created");
        assert_eq!(SeedOutcome::Updated.to_string(), "updated");
        assert_eq!(SeedOutcome::Skipped.to_string(), "skipped");
    }

    #[test]
    fn test_batch_failure_surfaces_original_error() {
        let failure = BatchFailure::new(
            vec![Seeded::created("invitation"), Seeded::updated("daily_digest")],
            DomainError::Configuration("weekly_digest seed missing".into()),
        );
        assert!(failure.to_string().starts_with("batch aborted after 2 completed steps"));

        let err: DomainError = failure.into();
        assert!(matches!(err, DomainError::Configuration(ref m) if m == "weekly_digest seed missing"));
    }
}
