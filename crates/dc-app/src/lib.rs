//! dcloud application layer.
//!
//! [`StorageClient`] adapts the storage program's ports into typed
//! operations; `usecases` composes it with content storage and hashing into
//! the flows the front end exposes.

pub mod client;
pub mod file_hash;
pub mod usecases;

pub use client::{ChainResult, StorageClient, UploadRequest};
pub use file_hash::unique_file_hash;
