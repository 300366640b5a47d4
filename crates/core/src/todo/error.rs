use thiserror::Error;

/// Errors raised when a request payload cannot become a valid todo operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title is required")]
    MissingTitle,
    #[error("At least one of title, description, is_complete or due_date is required")]
    EmptyUpdate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(ValidationError::MissingTitle.to_string(), "title is required");
        assert_eq!(
            ValidationError::EmptyUpdate.to_string(),
            "At least one of title, description, is_complete or due_date is required"
        );
    }
}
