//! PostgreSQL implementations of the domain store traits.

pub mod content_block;
pub mod email_template;
pub mod notification_template;

use domain::repositories::StoreError;

pub use content_block::ContentBlockRepository;
pub use email_template::EmailTemplateRepository;
pub use notification_template::NotificationTemplateRepository;

/// SQLSTATE for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Maps a sqlx error onto the store error of the persistence port.
pub(crate) fn store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unique constraint");
            return StoreError::Conflict(constraint.to_string());
        }
    }
    StoreError::Backend(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_backend() {
        let err = store_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Backend(_)));

        let err = store_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
