//! In-process stand-ins for the cluster and IPFS.
//!
//! [`InMemoryProgram`] applies the storage program's rules to account data
//! held in memory, encoded with the same byte layout a live cluster serves.
//! Used by the test suites.

mod content_store;
mod program;
mod wallet;

pub use content_store::InMemoryContentStore;
pub use program::{InMemoryProgram, MAX_CONTENT_ADDRESS_LEN, MAX_FILE_HASH_LEN, MAX_FILE_NAME_LEN};
pub use wallet::MemoryWallet;
