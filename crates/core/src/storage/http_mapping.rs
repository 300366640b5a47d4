//! Pure functions for mapping repository errors to HTTP status codes.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - anything else -> 500 (Internal Server Error)
///
/// Store failures of every kind (connectivity, throttling, malformed items)
/// collapse into a single 500 so no store detail leaks through the status.
///
/// # Examples
///
/// ```
/// use todos_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::todo_not_found("abc-123");
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::ConnectionFailed(_)
        | RepositoryError::QueryFailed(_)
        | RepositoryError::Serialization(_)
        | RepositoryError::InvalidData(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = RepositoryError::todo_not_found("todo-123");
        assert_eq!(repository_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_store_failures_map_to_500() {
        let errors = [
            RepositoryError::ConnectionFailed("dns failure".to_string()),
            RepositoryError::QueryFailed("throttled".to_string()),
            RepositoryError::Serialization("bad json".to_string()),
            RepositoryError::InvalidData("missing title".to_string()),
        ];

        for error in &errors {
            assert_eq!(repository_error_to_status_code(error), 500, "{error}");
        }
    }
}
