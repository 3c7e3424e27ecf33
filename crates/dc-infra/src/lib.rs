//! dcloud infrastructure: implementations of the dc-core ports.
//!
//! - `solana`: JSON-RPC account reader and keypair wallet for a live cluster
//! - `ipfs`: gateway/API backed content store
//! - `memory`: in-process program, wallet and content store for tests and dry runs
//! - `config`: file + environment configuration loading

pub mod config;
pub mod hashing;
pub mod ipfs;
pub mod memory;
pub mod solana;
pub mod time;

pub use hashing::Sha256Hasher;
pub use time::SystemClock;
