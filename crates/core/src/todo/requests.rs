//! API request types for todo operations.
//!
//! Every field is an `Option` so that defaults and partial updates are decided
//! by presence in the payload, never by truthiness: `false` and `""` count as
//! supplied values. A JSON `null` is treated the same as a missing field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::types::Todo;

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_complete: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::serde::option_iso8601"
    )]
    pub due_date: Option<DateTime<Utc>>,
}

impl CreateTodoRequest {
    /// Create a new request with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_completed(mut self, is_complete: bool) -> Self {
        self.is_complete = Some(is_complete);
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Convert into a Todo with a freshly minted id.
    ///
    /// `is_complete` defaults to `false` and `due_date` defaults to `now`.
    pub fn into_todo(self, now: DateTime<Utc>) -> Result<Todo, ValidationError> {
        let title = self.title.ok_or(ValidationError::MissingTitle)?;

        let mut todo = Todo::new(title, self.due_date.unwrap_or(now))
            .with_completed(self.is_complete.unwrap_or(false));
        todo.description = self.description;

        Ok(todo)
    }
}

/// Request payload for a partial update of a todo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_complete: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::serde::option_iso8601"
    )]
    pub due_date: Option<DateTime<Utc>>,
}

impl UpdateTodoRequest {
    /// Create an empty update request.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_completed(mut self, is_complete: bool) -> Self {
        self.is_complete = Some(is_complete);
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Names of the fields this request supplies, in a stable order.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut fields = Vec::with_capacity(4);
        if self.title.is_some() {
            fields.push("title");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.is_complete.is_some() {
            fields.push("is_complete");
        }
        if self.due_date.is_some() {
            fields.push("due_date");
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.field_names().is_empty()
    }

    /// Rejects an update that supplies no fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        Ok(())
    }

    /// Apply the supplied fields to an existing todo, leaving the rest untouched.
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(description) = &self.description {
            todo.description = Some(description.clone());
        }
        if let Some(is_complete) = self.is_complete {
            todo.is_complete = is_complete;
        }
        if let Some(due_date) = self.due_date {
            todo.due_date = crate::serde::normalize_timestamp(due_date);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 10, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_into_todo_applies_defaults() {
        let todo = CreateTodoRequest::new("Buy milk").into_todo(now()).unwrap();

        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.description, None);
        assert!(!todo.is_complete);
        assert_eq!(todo.due_date, now());
    }

    #[test]
    fn test_into_todo_keeps_supplied_values() {
        let due = Utc.with_ymd_and_hms(2025, 12, 24, 18, 0, 0).unwrap();
        let todo = CreateTodoRequest::new("Wrap gifts")
            .with_description("all of them")
            .with_completed(true)
            .with_due_date(due)
            .into_todo(now())
            .unwrap();

        assert_eq!(todo.description.as_deref(), Some("all of them"));
        assert!(todo.is_complete);
        assert_eq!(todo.due_date, due);
    }

    #[test]
    fn test_into_todo_explicit_false_is_kept() {
        let todo = CreateTodoRequest::new("x")
            .with_completed(false)
            .into_todo(now())
            .unwrap();
        assert!(!todo.is_complete);
    }

    #[test]
    fn test_into_todo_empty_title_is_accepted() {
        let todo = CreateTodoRequest::new("").into_todo(now()).unwrap();
        assert_eq!(todo.title, "");
    }

    #[test]
    fn test_into_todo_requires_title() {
        let result = CreateTodoRequest::default().into_todo(now());
        assert_eq!(result, Err(ValidationError::MissingTitle));
    }

    #[test]
    fn test_create_request_ignores_unknown_fields() {
        let req: CreateTodoRequest =
            serde_json::from_str(r#"{"title": "a", "owner": "bob", "priority": 3}"#).unwrap();
        assert_eq!(req, CreateTodoRequest::new("a"));
    }

    #[test]
    fn test_update_request_presence_not_truthiness() {
        let req: UpdateTodoRequest =
            serde_json::from_str(r#"{"description": "", "is_complete": false}"#).unwrap();

        assert_eq!(req.description.as_deref(), Some(""));
        assert_eq!(req.is_complete, Some(false));
        assert_eq!(req.field_names(), vec!["description", "is_complete"]);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_request_null_is_absent() {
        let req: UpdateTodoRequest = serde_json::from_str(r#"{"title": null}"#).unwrap();
        assert!(req.is_empty());
    }

    #[test]
    fn test_empty_update_is_rejected() {
        let req: UpdateTodoRequest = serde_json::from_str(r#"{"unknown": 1}"#).unwrap();
        assert_eq!(req.validate(), Err(ValidationError::EmptyUpdate));
    }

    #[test]
    fn test_apply_to_only_touches_supplied_fields() {
        let original = Todo::new("Buy milk", now()).with_description("2 liters");
        let mut todo = original.clone();

        UpdateTodoRequest::new().with_title("Buy oat milk").apply_to(&mut todo);

        assert_eq!(todo.title, "Buy oat milk");
        assert_eq!(todo.id, original.id);
        assert_eq!(todo.description, original.description);
        assert_eq!(todo.is_complete, original.is_complete);
        assert_eq!(todo.due_date, original.due_date);
    }

    #[test]
    fn test_apply_to_sets_all_fields() {
        let due = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut todo = Todo::new("a", now());

        UpdateTodoRequest::new()
            .with_title("b")
            .with_description("c")
            .with_completed(true)
            .with_due_date(due)
            .apply_to(&mut todo);

        assert_eq!(todo.title, "b");
        assert_eq!(todo.description.as_deref(), Some("c"));
        assert!(todo.is_complete);
        assert_eq!(todo.due_date, due);
    }
}
