//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the driver.
//! All types derive Serde traits for deserialization from config files.
//! Secret seeds are deliberately absent: they only come from the environment.

use serde::{Deserialize, Serialize};

/// Root configuration for the demo driver.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DriverConfig {
    /// Full node and faucet endpoints.
    pub rpc: RpcConfig,

    /// Compiled package and call settings.
    pub contract: ContractConfig,

    /// Literal values used for the airdropped NFT.
    pub nft: NftConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Remote endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL.
    pub url: String,

    /// Optional faucet base URL; faucet funding is skipped when unset.
    pub faucet_url: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:9000".to_string(),
            faucet_url: None,
            timeout_secs: 30,
        }
    }
}

/// How the NFT is redeemed at the end of the business flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RedeemFlow {
    /// User requests, merchant confirms.
    #[default]
    TwoPhase,
    /// Merchant redeems in a single call.
    Direct,
}

impl std::str::FromStr for RedeemFlow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "two_phase" => Ok(RedeemFlow::TwoPhase),
            "direct" => Ok(RedeemFlow::Direct),
            other => Err(format!("unknown redeem flow '{}'", other)),
        }
    }
}

/// Contract package configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Path to the compiled `.mv` module.
    pub module_path: String,

    /// Move module name inside the package.
    pub module_name: String,

    /// Gas budget attached to every transaction.
    pub gas_budget: u64,

    /// Redeem flow variant.
    pub redeem_flow: RedeemFlow,

    /// Page size hint for dynamic field queries (node default when unset).
    pub page_limit: Option<usize>,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            module_path: "packages/momentx/build/MomentX/bytecode_modules/coffee_nft.mv"
                .to_string(),
            module_name: "coffee_nft".to_string(),
            gas_budget: 100_000,
            redeem_flow: RedeemFlow::TwoPhase,
            page_limit: None,
        }
    }
}

/// NFT metadata passed to `airdrop` and the redeem calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NftConfig {
    pub name: String,
    pub description: String,
    pub image_url_initial: String,
    pub image_url_redeemed: String,
}

impl Default for NftConfig {
    fn default() -> Self {
        Self {
            name: "coffee".to_string(),
            description: "coffee NFT to redeem a cup of coffee".to_string(),
            image_url_initial: "https://coffee-nft/image/url/initial".to_string(),
            image_url_redeemed: "https://coffee-nft/image/url/redeemed".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable ones.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "coffee_nft=info".to_string(),
            json_logs: false,
        }
    }
}
