//! Devnet faucet client.

use serde_json::json;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult, FaucetResponse, SuiAddress};

/// Requests gas coins from a faucet service.
#[derive(Debug, Clone)]
pub struct FaucetClient {
    http: reqwest::Client,
    gas_url: url::Url,
    timeout_duration: Duration,
}

impl FaucetClient {
    pub fn new(faucet_url: &str, timeout_secs: u64) -> BlockchainResult<Self> {
        let invalid = |reason: String| BlockchainError::InvalidUrl {
            url: faucet_url.to_string(),
            reason,
        };
        let base: url::Url = faucet_url.parse().map_err(|e: url::ParseError| invalid(e.to_string()))?;
        let gas_url = base.join("gas").map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            http: reqwest::Client::new(),
            gas_url,
            timeout_duration: Duration::from_secs(timeout_secs),
        })
    }

    /// Ask the faucet to fund `recipient`.
    pub async fn request_funds(&self, recipient: SuiAddress) -> BlockchainResult<FaucetResponse> {
        let body = json!({ "FixedAmountRequest": { "recipient": recipient.to_string() } });

        let call = async {
            let response = self.http.post(self.gas_url.clone()).json(&body).send().await?;
            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(BlockchainError::Faucet(format!("HTTP {}: {}", status.as_u16(), text)));
            }
            let reply: FaucetResponse = response.json().await?;
            Ok(reply)
        };

        let reply = timeout(self.timeout_duration, call)
            .await
            .map_err(|_| BlockchainError::Timeout(self.timeout_duration.as_secs()))??;

        if let Some(error) = &reply.error {
            return Err(BlockchainError::Faucet(error.clone()));
        }

        tracing::info!(
            recipient = %recipient,
            coins = reply.transferred_gas_objects.len(),
            "Faucet funds received"
        );
        Ok(reply)
    }
}
