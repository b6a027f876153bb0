//! Coffee NFT demo driver library.

pub mod blockchain;
pub mod config;
pub mod driver;
pub mod observability;

pub use blockchain::SuiClient;
pub use config::DriverConfig;
pub use driver::{Driver, DriverError, RunSummary};
