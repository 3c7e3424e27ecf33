use async_trait::async_trait;

use crate::ids::{Address, TxSignature};
use crate::ports::errors::ChainError;
use crate::program::ProgramRequest;

/// Signing capability of the connected wallet.
///
/// Injected once per client; the wallet is the only party that can authorize
/// requests on behalf of its identity.
#[async_trait]
pub trait WalletPort: Send + Sync {
    /// Identity of the connected account, `None` when disconnected.
    fn current_identity(&self) -> Option<Address>;

    /// Signs `request` as the current identity and submits it.
    async fn sign_and_send(&self, request: ProgramRequest) -> Result<TxSignature, ChainError>;
}
