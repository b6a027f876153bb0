//! Pipeline error definitions.

use std::path::PathBuf;
use thiserror::Error;

use crate::blockchain::types::{BlockchainError, ExecutionStatus, ObjectId};
use crate::driver::actions::Step;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Any node, faucet or wallet failure.
    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    /// The compiled module could not be read.
    #[error("Failed to read module {}: {source}", .path.display())]
    ModuleRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Publish effects carried no `newObject` event. Fatal, never retried.
    #[error("Publish effects contain no newObject event")]
    MissingNewObjectEvent,

    /// An expected field is absent from an object snapshot.
    #[error("Object {object} has no field at {path}")]
    MissingField { object: ObjectId, path: String },

    /// The transaction executed but the ledger reported failure.
    #[error("Step {step} failed on-chain: {status}")]
    ExecutionFailed { step: Step, status: ExecutionStatus },
}

/// Result type for pipeline operations.
pub type DriverResult<T> = Result<T, DriverError>;
