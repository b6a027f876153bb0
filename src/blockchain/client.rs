//! Sui JSON-RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the full node JSON-RPC endpoint
//! - Build publish / Move call transactions and execute signed ones
//! - Query objects, dynamic fields and owned objects
//! - Map transport, timeout and JSON-RPC errors into `BlockchainError`

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{
    BlockchainError, BlockchainResult, CertifiedEffects, DynamicFieldPage,
    ExecuteTransactionResponse, ObjectId, ObjectRead, RpcConfig, SuiAddress, SuiObjectInfo,
    TransactionBytes,
};

/// Execution mode requested from the node.
const EXECUTE_REQUEST_TYPE: &str = "WaitForLocalExecution";

/// A Move function invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveCall {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Value>,
}

impl MoveCall {
    pub fn new(package: ObjectId, module: &str, function: &str) -> Self {
        Self {
            package,
            module: module.to_string(),
            function: function.to_string(),
            type_arguments: Vec::new(),
            arguments: Vec::new(),
        }
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.arguments.push(value.into());
        self
    }
}

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcErrorObject>,
}

#[derive(Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
}

/// Sui full node client.
///
/// One instance is created per run and shared by reference with every step.
#[derive(Clone)]
pub struct SuiClient {
    http: reqwest::Client,
    endpoint: url::Url,
    timeout_duration: Duration,
    next_id: Arc<AtomicU64>,
}

impl SuiClient {
    /// Create a new client for the configured endpoint.
    pub fn new(config: &RpcConfig) -> BlockchainResult<Self> {
        let endpoint: url::Url = config.url.parse().map_err(|e: url::ParseError| {
            BlockchainError::InvalidUrl {
                url: config.url.clone(),
                reason: e.to_string(),
            }
        })?;

        tracing::info!(
            rpc_url = %endpoint,
            timeout_secs = config.timeout_secs,
            "Sui client initialized"
        );

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
            timeout_duration: Duration::from_secs(config.timeout_secs),
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Issue one JSON-RPC call and decode its result.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> BlockchainResult<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        tracing::debug!(rpc_id = id, method = method, params = %body.params, "RPC request");

        let call = async {
            let response = self
                .http
                .post(self.endpoint.clone())
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(BlockchainError::Status {
                    status: status.as_u16(),
                    body: text,
                });
            }

            let value: Value = response.json().await?;
            Ok(value)
        };

        let value = match timeout(self.timeout_duration, call).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!(rpc_id = id, method = method, "RPC timeout");
                return Err(BlockchainError::Timeout(self.timeout_duration.as_secs()));
            }
        };

        tracing::debug!(rpc_id = id, method = method, response = %value, "RPC response");

        let decoded: JsonRpcResponse<T> = serde_json::from_value(value)
            .map_err(|e| BlockchainError::Decode(format!("{} response: {}", method, e)))?;

        if let Some(error) = decoded.error {
            return Err(BlockchainError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        decoded
            .result
            .ok_or_else(|| BlockchainError::Decode(format!("{} response has no result", method)))
    }

    /// Build an unsigned publish transaction for the given compiled modules.
    pub async fn publish(
        &self,
        sender: SuiAddress,
        compiled_modules: &[Vec<u8>],
        gas_budget: u64,
    ) -> BlockchainResult<TransactionBytes> {
        let modules: Vec<String> = compiled_modules
            .iter()
            .map(|m| BASE64_STANDARD.encode(m))
            .collect();
        self.request(
            "sui_publish",
            json!([sender.to_string(), modules, Value::Null, gas_budget]),
        )
        .await
    }

    /// Build an unsigned Move call transaction.
    pub async fn move_call(
        &self,
        sender: SuiAddress,
        call: &MoveCall,
        gas_budget: u64,
    ) -> BlockchainResult<TransactionBytes> {
        self.request(
            "sui_moveCall",
            json!([
                sender.to_string(),
                call.package,
                call.module,
                call.function,
                call.type_arguments,
                call.arguments,
                Value::Null,
                gas_budget
            ]),
        )
        .await
    }

    /// Execute signed transaction bytes and wait for local execution.
    pub async fn execute_transaction(
        &self,
        tx_bytes: &str,
        signature: &str,
    ) -> BlockchainResult<CertifiedEffects> {
        let response: ExecuteTransactionResponse = self
            .request(
                "sui_executeTransactionSerializedSig",
                json!([tx_bytes, signature, EXECUTE_REQUEST_TYPE]),
            )
            .await?;
        Ok(response.into_certified())
    }

    /// Fetch an object snapshot.
    pub async fn get_object(&self, id: &ObjectId) -> BlockchainResult<ObjectRead> {
        self.request("sui_getObject", json!([id])).await
    }

    /// Fetch one page of a dynamic field collection.
    pub async fn get_dynamic_fields(
        &self,
        parent: &ObjectId,
        cursor: Option<&ObjectId>,
        limit: Option<usize>,
    ) -> BlockchainResult<DynamicFieldPage> {
        self.request("sui_getDynamicFields", json!([parent, cursor, limit]))
            .await
    }

    /// Fetch the object stored under `name` in a dynamic field collection.
    pub async fn get_dynamic_field_object(
        &self,
        parent: &ObjectId,
        name: &str,
    ) -> BlockchainResult<ObjectRead> {
        self.request("sui_getDynamicFieldObject", json!([parent, name]))
            .await
    }

    /// List objects owned by an address.
    pub async fn get_objects_owned_by_address(
        &self,
        address: SuiAddress,
    ) -> BlockchainResult<Vec<SuiObjectInfo>> {
        self.request("sui_getObjectsOwnedByAddress", json!([address.to_string()]))
            .await
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }
}

impl std::fmt::Debug for SuiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiClient")
            .field("rpc_url", &self.endpoint.as_str())
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
