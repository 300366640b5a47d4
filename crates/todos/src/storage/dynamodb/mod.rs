//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of `TodoRepository`
//! using `aws-sdk-dynamodb`. Each todo is one item keyed by `id`.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbRepository;
