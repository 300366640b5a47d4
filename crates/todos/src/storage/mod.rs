//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository trait
//! defined in `todos_core::storage`. The backend is picked at startup with
//! `--storage`:
//!
//! - `dynamodb` (default): AWS DynamoDB via `aws-sdk-dynamodb`, compiled in
//!   with the `dynamodb` feature
//! - `memory`: process-local storage, lost on restart
//!
//! # Examples
//!
//! Build without DynamoDB support:
//! ```bash
//! cargo build -p todos --no-default-features
//! ```

use std::sync::Arc;

use anyhow::Context;
use todos_core::storage::TodoRepository;

use crate::config::Config;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbRepository;
pub use inmemory::InMemoryRepository;

/// Storage backends selectable at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StorageBackend {
    /// In-process storage, for development and tests
    Memory,
    /// AWS DynamoDB
    Dynamodb,
}

/// Builds the repository for `backend` and checks that its store is reachable.
///
/// This runs once at startup; the returned handle is shared by every request.
#[cfg_attr(not(feature = "dynamodb"), allow(unused_variables))]
pub async fn connect(
    backend: StorageBackend,
    config: &Config,
) -> anyhow::Result<Arc<dyn TodoRepository>> {
    let repo: Arc<dyn TodoRepository> = match backend {
        StorageBackend::Memory => Arc::new(InMemoryRepository::new()),
        #[cfg(feature = "dynamodb")]
        StorageBackend::Dynamodb => Arc::new(DynamoDbRepository::connect(config).await),
        #[cfg(not(feature = "dynamodb"))]
        StorageBackend::Dynamodb => {
            anyhow::bail!("DynamoDB support is not compiled in; rebuild with --features dynamodb")
        }
    };

    repo.ping()
        .await
        .with_context(|| format!("{backend:?} storage backend is unreachable"))?;

    tracing::info!(backend = ?backend, "Storage backend ready");

    Ok(repo)
}
