//! Ledger integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (hex seeds, RPC URL)
//!     → wallet.rs (identity loading, address derivation, signing)
//!     → client.rs (JSON-RPC connection with timeouts)
//!     → transaction.rs (build, sign, execute)
//!     → faucet.rs (devnet funding)
//! ```
//!
//! # Security Constraints
//! - Secret seeds ONLY from environment variables
//! - Never log secret key material
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod faucet;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::{MoveCall, SuiClient};
pub use faucet::FaucetClient;
pub use transaction::TxSigner;
pub use types::{BlockchainError, BlockchainResult, ObjectId, SuiAddress};
pub use wallet::{Identities, Identity, Role};
