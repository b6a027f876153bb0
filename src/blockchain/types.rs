//! Sui wire types and error definitions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// Re-export RpcConfig from config module to avoid duplication
pub use crate::config::schema::RpcConfig;

/// Opaque identifier of a ledger-held object (package, shared object, NFT, table).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub String);

impl ObjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// 20-byte Sui account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuiAddress(pub [u8; 20]);

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for SuiAddress {
    type Err = BlockchainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(raw)
            .map_err(|e| BlockchainError::Decode(format!("Invalid address '{}': {}", s, e)))?;
        let array: [u8; 20] = bytes.try_into().map_err(|v: Vec<u8>| {
            BlockchainError::Decode(format!("Address must be 20 bytes, got {}", v.len()))
        })?;
        Ok(Self(array))
    }
}

impl Serialize for SuiAddress {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SuiAddress {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// Transport-level failure talking to the node or faucet.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Node answered with a non-2xx status.
    #[error("Node returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// JSON-RPC error object returned by the node.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Response did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid secret key material or signing failure.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Faucet rejected the request.
    #[error("Faucet error: {0}")]
    Faucet(String),

    /// Endpoint URL could not be parsed.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Result type for ledger operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Unsigned transaction bytes built by the node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBytes {
    /// Base64-encoded BCS transaction data.
    pub tx_bytes: String,
    #[serde(default)]
    pub gas: Value,
    #[serde(default)]
    pub input_objects: Value,
}

/// Execution status reported in transaction effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionStatus {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            Some(error) => write!(f, "{} ({})", self.status, error),
            None => f.write_str(&self.status),
        }
    }
}

/// Payload of a `newObject` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewObjectEvent {
    pub package_id: ObjectId,
    pub object_id: ObjectId,
    #[serde(default)]
    pub transaction_module: String,
    #[serde(default)]
    pub sender: Value,
    #[serde(default)]
    pub recipient: Value,
}

/// One emitted event. Only `newObject` is decoded; every other kind is kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiEvent {
    #[serde(rename = "newObject", default, skip_serializing_if = "Option::is_none")]
    pub new_object: Option<NewObjectEvent>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Transaction effects as reported by the node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEffects {
    pub status: ExecutionStatus,
    #[serde(default)]
    pub transaction_digest: String,
    #[serde(default)]
    pub events: Vec<SuiEvent>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// The `effects` envelope of an executed transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectsEnvelope {
    pub effects: TransactionEffects,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Certificate plus effects of an executed transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertifiedEffects {
    #[serde(default)]
    pub certificate: Value,
    pub effects: EffectsEnvelope,
}

impl CertifiedEffects {
    pub fn effects(&self) -> &TransactionEffects {
        &self.effects.effects
    }

    pub fn digest(&self) -> &str {
        &self.effects.effects.transaction_digest
    }
}

/// Response of `sui_executeTransactionSerializedSig`.
///
/// Nodes wrap the certified effects in `EffectsCert`; older ones return them bare.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExecuteTransactionResponse {
    Wrapped {
        #[serde(rename = "EffectsCert")]
        effects_cert: CertifiedEffects,
    },
    Plain(CertifiedEffects),
}

impl ExecuteTransactionResponse {
    pub fn into_certified(self) -> CertifiedEffects {
        match self {
            Self::Wrapped { effects_cert } => effects_cert,
            Self::Plain(certified) => certified,
        }
    }
}

/// Snapshot of an object as returned by `sui_getObject`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRead {
    pub status: String,
    #[serde(default)]
    pub details: Value,
}

impl ObjectRead {
    /// Look up a nested value under `details` by JSON pointer.
    pub fn field(&self, pointer: &str) -> Option<&Value> {
        self.details.pointer(pointer)
    }
}

/// One cursor-delimited page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T, C> {
    pub data: Vec<T>,
    /// `None` is the end-of-collection sentinel.
    pub next_cursor: Option<C>,
}

/// Entry of a dynamic field collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicFieldInfo {
    pub name: Value,
    pub object_id: ObjectId,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub object_type: String,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub digest: String,
}

pub type DynamicFieldPage = Page<DynamicFieldInfo, ObjectId>;

/// Summary of an owned object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiObjectInfo {
    pub object_id: ObjectId,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub digest: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub owner: Value,
    #[serde(default)]
    pub previous_transaction: String,
}

/// Faucet reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaucetResponse {
    #[serde(default)]
    pub transferred_gas_objects: Vec<Value>,
    #[serde(default)]
    pub error: Option<String>,
}
