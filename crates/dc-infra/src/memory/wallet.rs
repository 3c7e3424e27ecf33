use std::sync::Arc;

use async_trait::async_trait;
use dc_core::ports::{ChainError, WalletPort};
use dc_core::program::ProgramRequest;
use dc_core::{Address, TxSignature};

use super::InMemoryProgram;

/// Wallet that submits straight to an [`InMemoryProgram`].
pub struct MemoryWallet {
    program: Arc<InMemoryProgram>,
    identity: Option<Address>,
}

impl MemoryWallet {
    /// `identity: None` models a disconnected wallet.
    pub fn new(program: Arc<InMemoryProgram>, identity: Option<Address>) -> Self {
        Self { program, identity }
    }
}

#[async_trait]
impl WalletPort for MemoryWallet {
    fn current_identity(&self) -> Option<Address> {
        self.identity
    }

    async fn sign_and_send(&self, request: ProgramRequest) -> Result<TxSignature, ChainError> {
        let identity = self
            .identity
            .ok_or_else(|| ChainError::precondition("wallet not connected"))?;
        self.program.execute(identity, request)
    }
}
