//! Transaction building, signing, and execution.
//!
//! # Responsibilities
//! - Ask the node to build publish / Move call transaction bytes
//! - Sign them with the acting identity
//! - Execute and return the certified effects

use crate::blockchain::client::{MoveCall, SuiClient};
use crate::blockchain::types::{BlockchainResult, CertifiedEffects, TransactionBytes};
use crate::blockchain::wallet::Identity;

/// Signs and executes transactions on behalf of one identity.
pub struct TxSigner<'a> {
    client: &'a SuiClient,
    identity: &'a Identity,
    gas_budget: u64,
}

impl<'a> TxSigner<'a> {
    pub fn new(client: &'a SuiClient, identity: &'a Identity, gas_budget: u64) -> Self {
        Self {
            client,
            identity,
            gas_budget,
        }
    }

    /// Publish compiled modules.
    pub async fn publish(&self, compiled_modules: &[Vec<u8>]) -> BlockchainResult<CertifiedEffects> {
        let tx = self
            .client
            .publish(self.identity.address(), compiled_modules, self.gas_budget)
            .await?;
        self.sign_and_execute(tx).await
    }

    /// Execute a Move call.
    pub async fn execute_move_call(&self, call: &MoveCall) -> BlockchainResult<CertifiedEffects> {
        let tx = self
            .client
            .move_call(self.identity.address(), call, self.gas_budget)
            .await?;
        self.sign_and_execute(tx).await
    }

    async fn sign_and_execute(&self, tx: TransactionBytes) -> BlockchainResult<CertifiedEffects> {
        let signature = self.identity.sign_transaction(&tx.tx_bytes)?;
        let certified = self
            .client
            .execute_transaction(&tx.tx_bytes, &signature)
            .await?;

        tracing::debug!(
            signer = %self.identity.role(),
            digest = certified.digest(),
            status = %certified.effects().status,
            "Transaction executed"
        );

        Ok(certified)
    }
}
