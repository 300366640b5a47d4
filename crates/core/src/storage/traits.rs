use async_trait::async_trait;

use crate::todo::{Todo, TodoId, UpdateTodoRequest};

use super::Result;

/// Repository for todo records.
///
/// Every operation touches a single record. Implementations translate store
/// failures into [`RepositoryError`](super::RepositoryError) and never expose
/// raw client errors.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Lists every todo whose `is_complete` is false, in no particular order.
    async fn list_incomplete(&self) -> Result<Vec<Todo>>;

    /// Gets a todo by its ID. `Ok(None)` means no record exists.
    async fn get_todo(&self, id: &TodoId) -> Result<Option<Todo>>;

    /// Stores a todo unconditionally, overwriting any record with the same ID.
    async fn create_todo(&self, todo: &Todo) -> Result<()>;

    /// Merges the supplied fields into an existing todo and returns the result.
    ///
    /// Fails with `NotFound` when no record exists; never creates one.
    async fn update_todo(&self, id: &TodoId, changes: &UpdateTodoRequest) -> Result<Todo>;

    /// Deletes a todo by its ID, returning whether a record existed.
    async fn delete_todo(&self, id: &TodoId) -> Result<bool>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<()>;
}
