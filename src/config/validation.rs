//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate endpoint URLs and value ranges
//! - Check Move identifiers
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DriverConfig → Result<(), Vec<ValidationError>>

use std::fmt;

use crate::config::schema::DriverConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn is_move_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    match url::Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(field, format!("invalid URL: {}", e))),
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &DriverConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(&mut errors, "rpc.url", &config.rpc.url);
    if let Some(faucet) = &config.rpc.faucet_url {
        check_url(&mut errors, "rpc.faucet_url", faucet);
    }
    if config.rpc.timeout_secs == 0 {
        errors.push(ValidationError::new("rpc.timeout_secs", "must be greater than 0"));
    }

    if config.contract.module_path.trim().is_empty() {
        errors.push(ValidationError::new("contract.module_path", "must not be empty"));
    }
    if !is_move_identifier(&config.contract.module_name) {
        errors.push(ValidationError::new(
            "contract.module_name",
            format!("'{}' is not a Move identifier", config.contract.module_name),
        ));
    }
    if config.contract.gas_budget == 0 {
        errors.push(ValidationError::new("contract.gas_budget", "must be greater than 0"));
    }
    if config.contract.page_limit == Some(0) {
        errors.push(ValidationError::new("contract.page_limit", "must be greater than 0"));
    }

    if config.nft.name.is_empty() {
        errors.push(ValidationError::new("nft.name", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
