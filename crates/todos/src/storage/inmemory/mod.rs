//! In-memory storage backend.
//!
//! This module provides an in-memory implementation of `TodoRepository` that
//! keeps every record in a HashMap wrapped in `Arc<RwLock<_>>`. It is used by
//! the router tests and for running the server without AWS access.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
