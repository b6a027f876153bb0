//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (.env via dotenvy, then process env)
//!     → validation.rs (semantic checks)
//!     → DriverConfig (validated, immutable)
//!     → passed by reference to every pipeline step
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Secrets never live in the file

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ContractConfig, DriverConfig, NftConfig, ObservabilityConfig, RedeemFlow, RpcConfig};
