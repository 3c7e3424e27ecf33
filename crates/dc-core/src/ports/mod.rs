//! Port interfaces for the application layer
//!
//! Ports define the contract between the client adapter and infrastructure
//! implementations, keeping RPC transports, wallets and content stores
//! swappable (a real cluster in production, an in-memory program in tests).

pub mod accounts;
mod clock;
pub mod content_store;
pub mod errors;
mod hash;
pub mod wallet;

pub use accounts::ProgramAccountsPort;
pub use clock::*;
pub use content_store::ContentStorePort;
pub use errors::ChainError;
pub use hash::*;
pub use wallet::WalletPort;
