//! # dc-core
//!
//! Core domain models and the program contract for dcloud.
//!
//! This crate contains pure logic without any infrastructure dependencies:
//! record shapes, deterministic address derivation, the byte layout shared with
//! the on-chain storage program, and the ports the application layer talks to.

// Public module exports
pub mod addressing;
pub mod config;
pub mod display;
pub mod ids;
pub mod ports;
pub mod program;
pub mod records;

// Re-export commonly used types at the crate root
pub use config::ClientConfig;
pub use ids::{Address, ContentAddress, FileHash, TxSignature};
pub use ports::errors::ChainError;
pub use program::{ProgramErrorCode, ProgramInstruction, ProgramRequest};
pub use records::{FileEntry, FileRecord, StorageRecord};
