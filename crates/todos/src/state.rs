//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. It holds the single repository instance built at startup.

use std::sync::Arc;

use todos_core::storage::TodoRepository;

use crate::storage::InMemoryRepository;

/// Shared application state.
///
/// This is cloned for each request handler; clones share the same repository.
#[derive(Clone)]
pub struct AppState {
    /// Todo repository (DynamoDB or in-memory).
    pub todo_repo: Arc<dyn TodoRepository>,
}

impl AppState {
    /// Creates a new AppState around an already constructed repository.
    pub fn new(todo_repo: Arc<dyn TodoRepository>) -> Self {
        Self { todo_repo }
    }

    /// Creates an AppState backed by an empty in-memory repository.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryRepository::new()))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::in_memory()
    }
}
