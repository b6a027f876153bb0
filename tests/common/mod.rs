//! Shared utilities for integration testing: an in-process mock Sui node.

#![allow(dead_code)]

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use coffee_nft::blockchain::wallet::{Identities, Identity, Role};
use coffee_nft::config::DriverConfig;

pub const PACKAGE_ID: &str = "0x5ac0ffee";
pub const GLOBAL_ID: &str = "0x91068a1";
pub const TABLE_ID: &str = "0x7ab1e";

pub const ADMIN_SEED: &str = "0101010101010101010101010101010101010101010101010101010101010101";
pub const MERCHANT_SEED: &str = "0202020202020202020202020202020202020202020202020202020202020202";
pub const USER_SEED: &str = "0303030303030303030303030303030303030303030303030303030303030303";

/// One JSON-RPC request seen by the mock.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub params: Value,
}

/// Scripted behavior and recorded traffic of the mock node.
#[derive(Debug, Default)]
pub struct MockState {
    pub calls: Vec<RecordedCall>,
    /// Hex public keys of executed transaction signers, with the executed tag.
    pub executions: Vec<(String, String)>,
    pub faucet_recipients: Vec<String>,
    /// Move function whose `sui_moveCall` returns a JSON-RPC error.
    pub rpc_error_function: Option<String>,
    /// Move function whose execution reports a failure status.
    pub failed_status_function: Option<String>,
    /// Replacement events for the publish effects.
    pub publish_events: Option<Value>,
    /// NFT object ids per dynamic field page.
    pub nft_pages: Vec<Vec<String>>,
    /// Delay applied to every RPC response.
    pub delay: Option<Duration>,
}

pub type SharedState = Arc<Mutex<MockState>>;

pub struct MockNode {
    pub addr: SocketAddr,
    pub state: SharedState,
}

impl MockNode {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Methods in call order, with the Move function appended for `sui_moveCall`.
    pub fn call_log(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| match c.method.as_str() {
                "sui_moveCall" => format!("sui_moveCall:{}", c.params[3].as_str().unwrap_or("")),
                other => other.to_string(),
            })
            .collect()
    }

    pub fn executions(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().executions.clone()
    }

    pub fn faucet_recipients(&self) -> Vec<String> {
        self.state.lock().unwrap().faucet_recipients.clone()
    }
}

/// Start a mock node on an ephemeral port.
pub async fn start_mock_node(state: MockState) -> MockNode {
    let state: SharedState = Arc::new(Mutex::new(state));
    let app = Router::new()
        .route("/", post(rpc))
        .route("/gas", post(faucet))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockNode { addr, state }
}

/// Default NFT table layout: two pages, three NFTs.
pub fn default_state() -> MockState {
    MockState {
        nft_pages: vec![
            vec!["0xnft1".to_string(), "0xnft2".to_string()],
            vec!["0xnft3".to_string()],
        ],
        ..MockState::default()
    }
}

pub fn identities() -> Identities {
    Identities {
        admin: Identity::from_hex_seed(Role::Admin, ADMIN_SEED).unwrap(),
        merchant: Identity::from_hex_seed(Role::Merchant, MERCHANT_SEED).unwrap(),
        user: Identity::from_hex_seed(Role::User, USER_SEED).unwrap(),
    }
}

/// Config pointing at the mock, with a throwaway module file.
pub fn config_for(node: &MockNode, name: &str) -> DriverConfig {
    let module_path = std::env::temp_dir().join(format!(
        "coffee_nft_{}_{}.mv",
        name,
        std::process::id()
    ));
    std::fs::write(&module_path, b"\xa1\x1c\xeb\x0b fake bytecode").unwrap();

    let mut config = DriverConfig::default();
    config.rpc.url = node.url();
    config.rpc.timeout_secs = 5;
    config.contract.module_path = module_path.to_string_lossy().into_owned();
    config
}

fn ok(id: &Value, result: Value) -> Json<Value> {
    Json(json!({ "jsonrpc": "2.0", "id": id, "result": result }))
}

fn err(id: &Value, code: i64, message: &str) -> Json<Value> {
    Json(json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } }))
}

fn tx_bytes(tag: &str) -> Value {
    json!({ "txBytes": BASE64_STANDARD.encode(tag), "gas": null, "inputObjects": [] })
}

fn effects(status: &str, digest: &str, events: Value) -> Value {
    json!({
        "EffectsCert": {
            "certificate": { "transactionDigest": digest },
            "effects": {
                "effects": {
                    "status": { "status": status },
                    "transactionDigest": digest,
                    "events": events
                }
            },
            "confirmed_local_execution": true
        }
    })
}

fn object(id: &str, fields: Value) -> Value {
    json!({
        "status": "Exists",
        "details": { "data": { "fields": fields }, "reference": { "objectId": id } }
    })
}

async fn rpc(State(state): State<SharedState>, Json(request): Json<Value>) -> Json<Value> {
    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default().to_string();
    let params = request["params"].clone();

    let delay = {
        let mut guard = state.lock().unwrap();
        guard.calls.push(RecordedCall {
            method: method.clone(),
            params: params.clone(),
        });
        guard.delay
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let mut guard = state.lock().unwrap();
    match method.as_str() {
        "sui_publish" => ok(&id, tx_bytes("publish")),
        "sui_moveCall" => {
            let function = params[3].as_str().unwrap_or_default();
            if guard.rpc_error_function.as_deref() == Some(function) {
                return err(&id, -32000, &format!("{} aborted", function));
            }
            ok(&id, tx_bytes(&format!("call:{}", function)))
        }
        "sui_executeTransactionSerializedSig" => {
            let tag = BASE64_STANDARD
                .decode(params[0].as_str().unwrap_or_default())
                .map(|b| String::from_utf8_lossy(&b).into_owned())
                .unwrap_or_default();
            let signature = BASE64_STANDARD
                .decode(params[1].as_str().unwrap_or_default())
                .unwrap_or_default();
            if signature.len() != 97 || signature[0] != 0 {
                return err(&id, -32602, "malformed signature");
            }
            guard
                .executions
                .push((hex::encode(&signature[65..]), tag.clone()));

            if tag == "publish" {
                let events = guard.publish_events.clone().unwrap_or_else(|| {
                    json!([
                        { "publish": { "packageId": PACKAGE_ID } },
                        { "newObject": {
                            "packageId": PACKAGE_ID,
                            "transactionModule": "coffee_nft",
                            "sender": "0xadmin",
                            "recipient": "Shared",
                            "objectId": GLOBAL_ID
                        } }
                    ])
                });
                return ok(&id, effects("success", "digest-publish", events));
            }

            let function = tag.trim_start_matches("call:");
            let status = if guard.failed_status_function.as_deref() == Some(function) {
                "failure"
            } else {
                "success"
            };
            ok(&id, effects(status, &format!("digest-{}", function), json!([])))
        }
        "sui_getObject" => {
            let object_id = params[0].as_str().unwrap_or_default();
            if object_id == GLOBAL_ID {
                ok(
                    &id,
                    object(
                        GLOBAL_ID,
                        json!({
                            "merchants": { "fields": { "contents": ["0xmerchant"] } },
                            "CoffeeNFTs": { "fields": { "id": { "id": TABLE_ID }, "size": "3" } }
                        }),
                    ),
                )
            } else {
                ok(&id, object(object_id, json!({ "name": "coffee" })))
            }
        }
        "sui_getDynamicFields" => {
            let index = match params[1].as_str() {
                None => 0,
                Some(cursor) => cursor
                    .trim_start_matches("cursor-")
                    .parse::<usize>()
                    .unwrap_or(usize::MAX),
            };
            let Some(page) = guard.nft_pages.get(index).cloned() else {
                return err(&id, -32602, "unknown cursor");
            };
            let next_cursor = if index + 1 < guard.nft_pages.len() {
                json!(format!("cursor-{}", index + 1))
            } else {
                Value::Null
            };
            let data: Vec<Value> = page
                .iter()
                .map(|nft| json!({ "name": "0xowner", "type": "DynamicObject", "objectType": "coffee_nft::CoffeeNFT", "objectId": nft, "version": 3, "digest": "d" }))
                .collect();
            ok(&id, json!({ "data": data, "nextCursor": next_cursor }))
        }
        "sui_getDynamicFieldObject" => ok(
            &id,
            object("0xusernft", json!({ "owner": params[1].clone() })),
        ),
        "sui_getObjectsOwnedByAddress" => ok(
            &id,
            json!([{ "objectId": "0xcoin", "version": 1, "digest": "d", "type": "0x2::coin::Coin<0x2::sui::SUI>", "owner": { "AddressOwner": params[0].clone() }, "previousTransaction": "t" }]),
        ),
        _ => err(&id, -32601, "method not found"),
    }
}

async fn faucet(State(state): State<SharedState>, Json(request): Json<Value>) -> Json<Value> {
    let recipient = request["FixedAmountRequest"]["recipient"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    state.lock().unwrap().faucet_recipients.push(recipient.clone());
    Json(json!({
        "transferredGasObjects": [{ "amount": 50000, "id": "0xgas", "transferTxDigest": "t" }],
        "error": null
    }))
}
