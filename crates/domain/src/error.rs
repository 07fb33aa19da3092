//! Domain error types.

use thiserror::Error;

use crate::repositories::StoreError;

/// Invalid caller input. Always recoverable by correcting the payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{field} cannot be empty")]
    EmptyValue { field: &'static str },

    #[error("{entity} '{key}' already exists")]
    DuplicateKey { entity: &'static str, key: String },

    #[error("Invalid {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

/// Errors surfaced by domain services.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A shipped seed asset is missing or unusable. Deployment defect, not user error.
    #[error("Configuration fault: {0}")]
    Configuration(String),

    /// Unique constraint rejected a write at the storage layer.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// True for both validator-detected duplicates and storage-level conflicts.
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            DomainError::Validation(ValidationError::DuplicateKey { .. }) | DomainError::Conflict(_)
        )
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => DomainError::Conflict(msg),
            StoreError::NotFound { entity, id } => DomainError::NotFound { entity, id },
            StoreError::Backend(msg) => DomainError::Storage(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::MissingField { field: "key" }.to_string(),
            "key is required"
        );
        assert_eq!(
            ValidationError::EmptyValue {
                field: "html_content"
            }
            .to_string(),
            "html_content cannot be empty"
        );
        assert_eq!(
            ValidationError::DuplicateKey {
                entity: "Content block",
                key: "terms_of_service".to_string()
            }
            .to_string(),
            "Content block 'terms_of_service' already exists"
        );
    }

    #[test]
    fn test_store_conflict_is_duplicate() {
        let err: DomainError = StoreError::Conflict("service_cms_blocks_key_key".into()).into();
        assert!(err.is_duplicate());

        let err: DomainError = ValidationError::DuplicateKey {
            entity: "Email template",
            key: "invitation".into(),
        }
        .into();
        assert!(err.is_duplicate());

        let err = DomainError::Configuration("missing seed".into());
        assert!(!err.is_duplicate());
    }

    #[test]
    fn test_store_not_found_maps_to_not_found() {
        let err: DomainError = StoreError::NotFound {
            entity: "Email template",
            id: "42".into(),
        }
        .into();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(err.to_string(), "Email template not found: 42");
    }
}
