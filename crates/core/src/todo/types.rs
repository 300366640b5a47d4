use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, server-minted identifier of a todo.
///
/// New ids are UUID v4 strings, but any string read back from the store or a
/// request path is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Mints a fresh, globally unique id.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A single todo record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_complete: bool,
    #[serde(with = "crate::serde::iso8601")]
    pub due_date: DateTime<Utc>,
}

impl Todo {
    /// Creates an incomplete todo with a freshly minted id.
    pub fn new(title: impl Into<String>, due_date: DateTime<Utc>) -> Self {
        Self {
            id: TodoId::new(),
            title: title.into(),
            description: None,
            is_complete: false,
            due_date: crate::serde::normalize_timestamp(due_date),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_completed(mut self, is_complete: bool) -> Self {
        self.is_complete = is_complete;
        self
    }

    /// Sets a specific ID for this todo (useful for testing).
    pub fn with_id(mut self, id: impl Into<TodoId>) -> Self {
        self.id = id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn due() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_new_todo_is_incomplete() {
        let todo = Todo::new("Buy milk", due());
        assert_eq!(todo.title, "Buy milk");
        assert!(!todo.is_complete);
        assert_eq!(todo.description, None);
        assert!(!todo.id.as_str().is_empty());
    }

    #[test]
    fn test_minted_ids_are_distinct() {
        let ids: HashSet<TodoId> = (0..500).map(|_| TodoId::new()).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_todo_json_shape() {
        let todo = Todo::new("Buy milk", due())
            .with_id("abc-123")
            .with_description("2 liters");
        let json = serde_json::to_value(&todo).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": "abc-123",
                "title": "Buy milk",
                "description": "2 liters",
                "is_complete": false,
                "due_date": "2025-06-01T09:30:00.000Z",
            })
        );
    }

    #[test]
    fn test_todo_json_omits_missing_description() {
        let todo = Todo::new("Buy milk", due());
        let json = serde_json::to_value(&todo).unwrap();
        assert!(json.get("description").is_none());
    }
}
