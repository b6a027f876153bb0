//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::{DriverConfig, RedeemFlow};
use crate::config::validation::{validate_config, ValidationError};

/// Full node JSON-RPC endpoint.
pub const RPC_URL_ENV_VAR: &str = "SUI_RPC_URL";
/// Optional faucet base URL.
pub const FAUCET_URL_ENV_VAR: &str = "FAUCET_URL";
pub const MODULE_PATH_ENV_VAR: &str = "COFFEE_NFT_MODULE_PATH";
pub const GAS_BUDGET_ENV_VAR: &str = "COFFEE_NFT_GAS_BUDGET";
pub const REDEEM_FLOW_ENV_VAR: &str = "COFFEE_NFT_REDEEM_FLOW";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    MissingEnv(&'static str),
    InvalidEnv { var: &'static str, reason: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::MissingEnv(var) => write!(f, "Environment variable {} not set", var),
            ConfigError::InvalidEnv { var, reason } => write!(f, "Invalid {}: {}", var, reason),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration from an optional TOML file, then the process environment.
pub fn load_config(path: Option<&Path>) -> Result<DriverConfig, ConfigError> {
    load_config_with(path, |var| std::env::var(var).ok())
}

/// Load configuration using `lookup` for environment values.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<DriverConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => DriverConfig::default(),
    };

    // Empty values count as unset so `.env` templates can leave them blank.
    let lookup = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    match lookup(RPC_URL_ENV_VAR) {
        Some(url) => config.rpc.url = url,
        None if path.is_none() => return Err(ConfigError::MissingEnv(RPC_URL_ENV_VAR)),
        None => {}
    }
    if let Some(faucet) = lookup(FAUCET_URL_ENV_VAR) {
        config.rpc.faucet_url = Some(faucet);
    }
    if let Some(module_path) = lookup(MODULE_PATH_ENV_VAR) {
        config.contract.module_path = module_path;
    }
    if let Some(budget) = lookup(GAS_BUDGET_ENV_VAR) {
        config.contract.gas_budget = budget.trim().parse::<u64>().map_err(|e| ConfigError::InvalidEnv {
            var: GAS_BUDGET_ENV_VAR,
            reason: e.to_string(),
        })?;
    }
    if let Some(flow) = lookup(REDEEM_FLOW_ENV_VAR) {
        config.contract.redeem_flow = flow
            .trim()
            .parse::<RedeemFlow>()
            .map_err(|reason| ConfigError::InvalidEnv {
                var: REDEEM_FLOW_ENV_VAR,
                reason,
            })?;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
