//! ID type wrappers for type safety.

mod address;
mod content_address;
mod file_hash;
mod id_macro;
mod tx_signature;

pub use address::{Address, AddressError};
pub use content_address::ContentAddress;
pub use file_hash::{FileHash, FileHashError, FILE_HASH_SEED_LEN};
pub use tx_signature::TxSignature;
