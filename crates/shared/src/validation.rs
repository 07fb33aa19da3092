//! Common validation utilities.

use validator::ValidationError;

/// Returns the trimmed value, or `None` when nothing is left after trimming.
pub fn trimmed_non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Returns true when the value is empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validates that every declared variable name is a non-blank token.
pub fn validate_variable_names(variables: &[String]) -> Result<(), ValidationError> {
    if variables.iter().any(|v| is_blank(v)) {
        let mut err = ValidationError::new("variables_blank");
        err.message = Some("Variable names cannot be blank".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_non_empty() {
        assert_eq!(trimmed_non_empty("  key  "), Some("key"));
        assert_eq!(trimmed_non_empty("key"), Some("key"));
        assert_eq!(trimmed_non_empty(""), None);
        assert_eq!(trimmed_non_empty(" \t\n "), None);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn test_validate_variable_names() {
        let ok = vec!["user_name".to_string(), "accept_url".to_string()];
        assert!(validate_variable_names(&ok).is_ok());
        assert!(validate_variable_names(&[]).is_ok());

        let bad = vec!["user_name".to_string(), " ".to_string()];
        let err = validate_variable_names(&bad).unwrap_err();
        assert_eq!(err.code, "variables_blank");
    }
}
