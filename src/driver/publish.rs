//! Publish step: upload the compiled module and locate the objects it created.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::blockchain::client::SuiClient;
use crate::blockchain::transaction::TxSigner;
use crate::blockchain::types::{ObjectId, TransactionEffects};
use crate::blockchain::wallet::Identity;
use crate::driver::actions::{ensure_success, Step};
use crate::driver::error::{DriverError, DriverResult};
use crate::observability::print_json;

/// Identifiers produced by publishing the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResult {
    /// Package id of the deployed module.
    pub module_id: ObjectId,
    /// Shared global state object created by the module initializer.
    pub global_object_id: ObjectId,
}

/// Read a compiled module from disk.
pub fn read_module(path: &Path) -> DriverResult<Vec<u8>> {
    std::fs::read(path).map_err(|source| DriverError::ModuleRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Take ids from the first `newObject` event in the effects.
pub fn extract_publish_result(effects: &TransactionEffects) -> DriverResult<PublishResult> {
    let event = effects
        .events
        .iter()
        .find_map(|e| e.new_object.as_ref())
        .ok_or(DriverError::MissingNewObjectEvent)?;

    print_json("newObjectEvent", event);

    Ok(PublishResult {
        module_id: event.package_id.clone(),
        global_object_id: event.object_id.clone(),
    })
}

/// Publish the module at `module_path` as `admin`.
pub async fn publish(
    client: &SuiClient,
    admin: &Identity,
    module_path: &Path,
    gas_budget: u64,
) -> DriverResult<PublishResult> {
    let module = read_module(module_path)?;
    tracing::info!(
        path = %module_path.display(),
        bytes = module.len(),
        gas_budget = gas_budget,
        "Publishing module"
    );

    let signer = TxSigner::new(client, admin, gas_budget);
    let certified = signer.publish(&[module]).await?;
    print_json(Step::Publish.result_label(), &certified);
    ensure_success(Step::Publish, &certified)?;

    let published = extract_publish_result(certified.effects())?;
    tracing::info!(
        module_id = %published.module_id,
        global_object_id = %published.global_object_id,
        digest = certified.digest(),
        "Module published"
    );
    Ok(published)
}
