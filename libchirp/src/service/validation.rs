//! Content validation service
//!
//! Checks post content before it is stored: empty or whitespace-only content
//! and the configured character limit. Failures are reported against the
//! `content` field.

use crate::error::ValidationError;
use crate::Config;
use std::sync::Arc;

/// Field that content errors are reported against
pub const CONTENT_FIELD: &str = "content";

/// Service for validating post content
///
/// # Example
///
/// ```no_run
/// use libchirp::service::validation::ValidationService;
/// use libchirp::Config;
/// use std::sync::Arc;
///
/// let service = ValidationService::new(Arc::new(Config::default()));
///
/// if let Err(errors) = service.validate("   ") {
///     println!("{}", errors);
/// }
/// ```
#[derive(Clone)]
pub struct ValidationService {
    config: Arc<Config>,
}

impl ValidationService {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Validate post content
    ///
    /// Length is counted in characters, not bytes.
    pub fn validate(&self, content: &str) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();

        if content.trim().is_empty() {
            errors.push(CONTENT_FIELD, "Content cannot be empty");
        }

        let max_length = self.max_length();
        let char_count = content.chars().count();
        if char_count > max_length {
            errors.push(
                CONTENT_FIELD,
                format!("Content must be at most {} characters", max_length),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn is_valid(&self, content: &str) -> bool {
        self.validate(content).is_ok()
    }

    pub fn max_length(&self) -> usize {
        self.config.posts.max_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ValidationService {
        ValidationService::new(Arc::new(Config::default()))
    }

    #[test]
    fn test_validate_valid_content() {
        assert!(service().validate("Hello world!").is_ok());
    }

    #[test]
    fn test_validate_empty_content() {
        let errors = service().validate("").unwrap_err();
        assert_eq!(errors.first(CONTENT_FIELD), Some("Content cannot be empty"));
    }

    #[test]
    fn test_validate_whitespace_only_content() {
        let errors = service().validate("   \n\t  ").unwrap_err();
        assert_eq!(errors.first(CONTENT_FIELD), Some("Content cannot be empty"));
    }

    #[test]
    fn test_validate_at_limit() {
        let content = "a".repeat(280);
        assert!(service().validate(&content).is_ok());
    }

    #[test]
    fn test_validate_over_limit() {
        let content = "a".repeat(281);
        let errors = service().validate(&content).unwrap_err();
        assert_eq!(
            errors.first(CONTENT_FIELD),
            Some("Content must be at most 280 characters")
        );
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        // 280 multi-byte characters
        let content = "🐦".repeat(280);
        assert!(content.len() > 280);
        assert!(service().is_valid(&content));
        assert!(!service().is_valid(&"🐦".repeat(281)));
    }

    #[test]
    fn test_configured_limit() {
        let mut config = Config::default();
        config.posts.max_length = 10;
        let service = ValidationService::new(Arc::new(config));

        assert_eq!(service.max_length(), 10);
        assert!(service.is_valid("0123456789"));
        assert!(!service.is_valid("0123456789x"));
    }
}
