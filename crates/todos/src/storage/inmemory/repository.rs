//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use todos_core::storage::{RepositoryError, Result, TodoRepository};
use todos_core::todo::{Todo, TodoId, UpdateTodoRequest};

/// In-memory storage backend.
///
/// Uses a HashMap wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    todos: Arc<RwLock<HashMap<TodoId, Todo>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            todos: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl TodoRepository for InMemoryRepository {
    async fn list_incomplete(&self) -> Result<Vec<Todo>> {
        let todos = self.todos.read().await;
        Ok(todos.values().filter(|t| !t.is_complete).cloned().collect())
    }

    async fn get_todo(&self, id: &TodoId) -> Result<Option<Todo>> {
        let todos = self.todos.read().await;
        Ok(todos.get(id).cloned())
    }

    async fn create_todo(&self, todo: &Todo) -> Result<()> {
        let mut todos = self.todos.write().await;
        todos.insert(todo.id.clone(), todo.clone());
        Ok(())
    }

    async fn update_todo(&self, id: &TodoId, changes: &UpdateTodoRequest) -> Result<Todo> {
        if changes.is_empty() {
            return Err(RepositoryError::InvalidData(
                "update supplies no fields".to_string(),
            ));
        }

        let mut todos = self.todos.write().await;
        let todo = todos
            .get_mut(id)
            .ok_or_else(|| RepositoryError::todo_not_found(id.as_str()))?;

        changes.apply_to(todo);
        Ok(todo.clone())
    }

    async fn delete_todo(&self, id: &TodoId) -> Result<bool> {
        let mut todos = self.todos.write().await;
        Ok(todos.remove(id).is_some())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
