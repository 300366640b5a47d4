//! DynamoDB repository implementation.
//!
//! Implements `TodoRepository` from `todos_core::storage` using DynamoDB.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;

use todos_core::storage::{RepositoryError, Result, TodoRepository};
use todos_core::todo::{Todo, TodoId, UpdateTodoRequest};

use super::conversions::{
    build_update_expression, item_to_todo, items_to_todos, todo_key, todo_to_item,
    ATTR_IS_COMPLETE,
    ITEM_EXISTS_CONDITION,
};
use super::error::{
    map_delete_item_error, map_describe_table_error, map_get_item_error, map_put_item_error,
    map_scan_error, map_update_item_error,
};
use crate::config::Config;

/// DynamoDB-based repository implementation.
///
/// Wraps a single SDK client; the client is cheap to clone and safe to share
/// between concurrent requests.
#[derive(Debug, Clone)]
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new repository from the application configuration.
    ///
    /// Uses the AWS SDK default credential chain, the configured region and,
    /// when set, a custom endpoint such as DynamoDB Local.
    pub async fn connect(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.aws_region.clone()));

        if let Some(endpoint) = &config.dynamodb_endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;

        tracing::info!(
            table = %config.table_name,
            region = %config.aws_region,
            endpoint = config.dynamodb_endpoint.as_deref().unwrap_or("default"),
            "Configured DynamoDB client"
        );

        Self::new(Client::new(&sdk_config), config.table_name.clone())
    }
}

#[async_trait]
impl TodoRepository for DynamoDbRepository {
    async fn list_incomplete(&self) -> Result<Vec<Todo>> {
        let mut todos = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        // A single Scan page stops at 1 MB, so follow LastEvaluatedKey to the end.
        loop {
            let result = self
                .client
                .scan()
                .table_name(&self.table_name)
                .filter_expression("#is_complete = :is_complete")
                .expression_attribute_names("#is_complete", ATTR_IS_COMPLETE)
                .expression_attribute_values(":is_complete", AttributeValue::Bool(false))
                .consistent_read(true)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(map_scan_error)?;

            todos.extend(items_to_todos(result.items()));

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(todos)
    }

    async fn get_todo(&self, id: &TodoId) -> Result<Option<Todo>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(todo_key(id)))
            .consistent_read(true)
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_todo(&item)?)),
            None => Ok(None),
        }
    }

    async fn create_todo(&self, todo: &Todo) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(todo_to_item(todo)))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn update_todo(&self, id: &TodoId, changes: &UpdateTodoRequest) -> Result<Todo> {
        let update = build_update_expression(changes).ok_or_else(|| {
            RepositoryError::InvalidData("update supplies no fields".to_string())
        })?;

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(todo_key(id)))
            .update_expression(update.expression)
            .condition_expression(ITEM_EXISTS_CONDITION)
            .set_expression_attribute_names(Some(update.names))
            .set_expression_attribute_values(Some(update.values))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, id.as_str()))?;

        let item = result.attributes.ok_or_else(|| {
            RepositoryError::InvalidData("UpdateItem returned no attributes".to_string())
        })?;

        item_to_todo(&item)
    }

    async fn delete_todo(&self, id: &TodoId) -> Result<bool> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(todo_key(id)))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(result.attributes.is_some_and(|old| !old.is_empty()))
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| map_describe_table_error(e, &self.table_name))?;

        Ok(())
    }
}
