//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and domain types.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use todos_core::serde::{format_timestamp, parse_timestamp};
use todos_core::storage::RepositoryError;
use todos_core::todo::{Todo, TodoId, UpdateTodoRequest};

// ============================================================================
// Attribute names
// ============================================================================

pub const ATTR_ID: &str = "id";
pub const ATTR_TITLE: &str = "title";
pub const ATTR_DESCRIPTION: &str = "description";
pub const ATTR_IS_COMPLETE: &str = "is_complete";
pub const ATTR_DUE_DATE: &str = "due_date";

// ============================================================================
// Todo conversions
// ============================================================================

/// Primary key of the item holding `id`.
pub fn todo_key(id: &TodoId) -> HashMap<String, AttributeValue> {
    HashMap::from([(ATTR_ID.to_string(), AttributeValue::S(id.to_string()))])
}

/// Convert a Todo to DynamoDB item.
pub fn todo_to_item(todo: &Todo) -> HashMap<String, AttributeValue> {
    let mut item = todo_key(&todo.id);

    item.insert(ATTR_TITLE.to_string(), AttributeValue::S(todo.title.clone()));
    if let Some(desc) = &todo.description {
        item.insert(ATTR_DESCRIPTION.to_string(), AttributeValue::S(desc.clone()));
    }
    item.insert(
        ATTR_IS_COMPLETE.to_string(),
        AttributeValue::Bool(todo.is_complete),
    );
    item.insert(
        ATTR_DUE_DATE.to_string(),
        AttributeValue::S(format_timestamp(&todo.due_date)),
    );

    item
}

/// Convert a DynamoDB item to Todo.
pub fn item_to_todo(item: &HashMap<String, AttributeValue>) -> Result<Todo, RepositoryError> {
    Ok(Todo {
        id: TodoId::from(get_string(item, ATTR_ID)?),
        title: get_string(item, ATTR_TITLE)?,
        description: get_optional_string(item, ATTR_DESCRIPTION),
        is_complete: get_bool(item, ATTR_IS_COMPLETE)?,
        due_date: get_datetime(item, ATTR_DUE_DATE)?,
    })
}

/// Decode a page of scanned items, skipping the ones that are not valid todos.
///
/// Items that fail to decode, such as ones written by earlier clients without
/// a `title` or with a non-RFC 3339 `due_date`, are logged and left out.
pub fn items_to_todos(items: &[HashMap<String, AttributeValue>]) -> Vec<Todo> {
    items
        .iter()
        .filter_map(|item| match item_to_todo(item) {
            Ok(todo) => Some(todo),
            Err(error) => {
                let id = item.get(ATTR_ID).and_then(|v| v.as_s().ok());
                tracing::warn!(id = ?id, error = %error, "Skipping undecodable todo item");
                None
            }
        })
        .collect()
}

// ============================================================================
// Update expressions
// ============================================================================

/// A `SET` update expression with its placeholder maps.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    pub expression: String,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

/// Condition guarding updates so that a missing item is never created.
pub const ITEM_EXISTS_CONDITION: &str = "attribute_exists(#id)";

/// Build the update expression for the fields supplied in `changes`.
///
/// Returns `None` when no field is supplied. Every attribute goes through a
/// `#name` placeholder, and `#id` is always present for
/// [`ITEM_EXISTS_CONDITION`].
pub fn build_update_expression(changes: &UpdateTodoRequest) -> Option<UpdateExpression> {
    let mut assignments = Vec::with_capacity(4);
    let mut names = HashMap::from([(format!("#{ATTR_ID}"), ATTR_ID.to_string())]);
    let mut values = HashMap::new();

    let mut set = |attr: &str, value: AttributeValue| {
        assignments.push(format!("#{attr} = :{attr}"));
        names.insert(format!("#{attr}"), attr.to_string());
        values.insert(format!(":{attr}"), value);
    };

    if let Some(title) = &changes.title {
        set(ATTR_TITLE, AttributeValue::S(title.clone()));
    }
    if let Some(description) = &changes.description {
        set(ATTR_DESCRIPTION, AttributeValue::S(description.clone()));
    }
    if let Some(is_complete) = changes.is_complete {
        set(ATTR_IS_COMPLETE, AttributeValue::Bool(is_complete));
    }
    if let Some(due_date) = &changes.due_date {
        set(ATTR_DUE_DATE, AttributeValue::S(format_timestamp(due_date)));
    }

    if assignments.is_empty() {
        return None;
    }

    Some(UpdateExpression {
        expression: format!("SET {}", assignments.join(", ")),
        names,
        values,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional string attribute.
fn get_optional_string(item: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

/// Get a required boolean attribute.
fn get_bool(item: &HashMap<String, AttributeValue>, key: &str) -> Result<bool, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    parse_timestamp(&s)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_todo() -> Todo {
        Todo::new(
            "Buy milk",
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        )
        .with_id("550e8400-e29b-41d4-a716-446655440003")
        .with_description("2 liters")
    }

    #[test]
    fn test_todo_round_trip() {
        let todo = sample_todo();
        let item = todo_to_item(&todo);
        let parsed = item_to_todo(&item).unwrap();

        assert_eq!(todo, parsed);
    }

    #[test]
    fn test_todo_item_layout() {
        let item = todo_to_item(&sample_todo());

        assert_eq!(
            item.get("id").unwrap().as_s().unwrap(),
            "550e8400-e29b-41d4-a716-446655440003"
        );
        assert_eq!(item.get("title").unwrap().as_s().unwrap(), "Buy milk");
        assert_eq!(item.get("description").unwrap().as_s().unwrap(), "2 liters");
        assert!(!item.get("is_complete").unwrap().as_bool().unwrap());
        assert_eq!(
            item.get("due_date").unwrap().as_s().unwrap(),
            "2024-01-15T10:30:00.000Z"
        );
    }

    #[test]
    fn test_missing_description_is_not_stored() {
        let mut todo = sample_todo();
        todo.description = None;

        let item = todo_to_item(&todo);
        assert!(!item.contains_key("description"));
        assert_eq!(item_to_todo(&item).unwrap().description, None);
    }

    #[test]
    fn test_item_missing_title_is_invalid() {
        let mut item = todo_to_item(&sample_todo());
        item.remove("title");

        assert_eq!(
            item_to_todo(&item),
            Err(RepositoryError::InvalidData(
                "Missing or invalid field: title".to_string()
            ))
        );
    }

    #[test]
    fn test_item_with_wrong_type_is_invalid() {
        let mut item = todo_to_item(&sample_todo());
        item.insert(
            "is_complete".to_string(),
            AttributeValue::S("false".to_string()),
        );

        assert!(matches!(
            item_to_todo(&item),
            Err(RepositoryError::InvalidData(_))
        ));
    }

    #[test]
    fn test_item_with_bad_due_date_is_invalid() {
        let mut item = todo_to_item(&sample_todo());
        item.insert(
            "due_date".to_string(),
            AttributeValue::S("tomorrow".to_string()),
        );

        assert!(matches!(
            item_to_todo(&item),
            Err(RepositoryError::InvalidData(_))
        ));
    }

    #[test]
    fn test_listing_skips_undecodable_items() {
        let valid = sample_todo();
        let untitled = HashMap::from([
            ("id".to_string(), AttributeValue::S("legacy".to_string())),
            ("is_complete".to_string(), AttributeValue::Bool(false)),
            ("due_date".to_string(), AttributeValue::S("2025-01-01".to_string())),
        ]);
        let mut bad_date = todo_to_item(&sample_todo().with_id("bad-date"));
        bad_date.insert(
            "due_date".to_string(),
            AttributeValue::S("next week".to_string()),
        );

        let todos = items_to_todos(&[untitled, todo_to_item(&valid), bad_date]);

        assert_eq!(todos, vec![valid]);
    }

    #[test]
    fn test_update_expression_single_field() {
        let update = build_update_expression(&UpdateTodoRequest::new().with_completed(true))
            .unwrap();

        assert_eq!(update.expression, "SET #is_complete = :is_complete");
        assert_eq!(update.names.get("#is_complete").unwrap(), "is_complete");
        assert_eq!(update.names.get("#id").unwrap(), "id");
        assert_eq!(
            update.values.get(":is_complete"),
            Some(&AttributeValue::Bool(true))
        );
        assert_eq!(update.values.len(), 1);
    }

    #[test]
    fn test_update_expression_keeps_falsy_values() {
        let update = build_update_expression(
            &UpdateTodoRequest::new()
                .with_description("")
                .with_completed(false),
        )
        .unwrap();

        assert_eq!(
            update.expression,
            "SET #description = :description, #is_complete = :is_complete"
        );
        assert_eq!(
            update.values.get(":description"),
            Some(&AttributeValue::S(String::new()))
        );
        assert_eq!(
            update.values.get(":is_complete"),
            Some(&AttributeValue::Bool(false))
        );
    }

    #[test]
    fn test_update_expression_all_fields() {
        let due = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        let update = build_update_expression(
            &UpdateTodoRequest::new()
                .with_title("t")
                .with_description("d")
                .with_completed(true)
                .with_due_date(due),
        )
        .unwrap();

        assert_eq!(
            update.expression,
            "SET #title = :title, #description = :description, \
             #is_complete = :is_complete, #due_date = :due_date"
        );
        assert_eq!(update.names.len(), 5);
        assert_eq!(
            update.values.get(":due_date"),
            Some(&AttributeValue::S("2025-12-31T23:59:59.000Z".to_string()))
        );
    }

    #[test]
    fn test_update_expression_empty() {
        assert_eq!(build_update_expression(&UpdateTodoRequest::new()), None);
    }
}
