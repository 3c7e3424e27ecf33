//! Live-cluster adapters over Solana JSON-RPC.

mod accounts;
mod keypair_wallet;
mod rpc;
mod transaction;

pub use accounts::RpcProgramAccounts;
pub use keypair_wallet::{KeypairError, KeypairWallet};
pub use rpc::{AccountFilter, RpcClient, RpcError, SignatureStatus};
pub use transaction::{compile_message, serialize_transaction, TransactionError};
