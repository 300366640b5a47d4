//! Core types and storage contracts for the todos service.
//!
//! Following the Functional Core pattern, nothing in this crate performs I/O:
//! the server crate provides the storage backends and the HTTP surface.

pub mod serde;
pub mod storage;
pub mod todo;
