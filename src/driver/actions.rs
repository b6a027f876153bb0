//! Business-action sequencing.
//!
//! The coffee NFT flow is a fixed list of Move calls. `plan_calls` turns the
//! publish result into that list; `execute_plan` runs it in order and stops
//! at the first failure. Calls already executed stay applied on the ledger.

use serde::Serialize;
use std::fmt;

use crate::blockchain::client::{MoveCall, SuiClient};
use crate::blockchain::transaction::TxSigner;
use crate::blockchain::types::{CertifiedEffects, SuiAddress};
use crate::blockchain::wallet::{Identities, Role};
use crate::config::{ContractConfig, NftConfig, RedeemFlow};
use crate::driver::error::{DriverError, DriverResult};
use crate::driver::publish::PublishResult;
use crate::observability::print_json;

/// One remote step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Publish,
    AddMerchant,
    Airdrop,
    RedeemRequest,
    RedeemConfirm,
    Redeem,
}

impl Step {
    /// Entry function name; `publish` is not a Move call but keeps the same label.
    pub fn function(&self) -> &'static str {
        match self {
            Step::Publish => "publish",
            Step::AddMerchant => "add_merchant",
            Step::Airdrop => "airdrop",
            Step::RedeemRequest => "redeem_request",
            Step::RedeemConfirm => "redeem_confirm",
            Step::Redeem => "redeem",
        }
    }

    /// Label printed in front of the step's transaction result.
    pub fn result_label(&self) -> &'static str {
        match self {
            Step::Publish => "publishTxn",
            Step::AddMerchant => "addMerchantTxn",
            Step::Airdrop => "airdropTxn",
            Step::RedeemRequest => "redeemRequestTxn",
            Step::RedeemConfirm => "redeemConfirmTxn",
            Step::Redeem => "redeemTxn",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function())
    }
}

/// Addresses the business calls refer to.
#[derive(Debug, Clone, Copy)]
pub struct Participants {
    pub merchant: SuiAddress,
    pub user: SuiAddress,
}

impl From<&Identities> for Participants {
    fn from(identities: &Identities) -> Self {
        Self {
            merchant: identities.merchant.address(),
            user: identities.user.address(),
        }
    }
}

/// A Move call together with the identity that signs it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedCall {
    pub step: Step,
    pub signer: Role,
    pub call: MoveCall,
}

/// Result of one executed step.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub step: Step,
    pub digest: String,
    pub effects: CertifiedEffects,
}

/// Fail the step when the ledger reports a non-success status.
pub fn ensure_success(step: Step, certified: &CertifiedEffects) -> DriverResult<()> {
    let status = &certified.effects().status;
    if status.is_success() {
        Ok(())
    } else {
        Err(DriverError::ExecutionFailed {
            step,
            status: status.clone(),
        })
    }
}

/// Build the ordered call list for the coffee NFT flow.
pub fn plan_calls(
    published: &PublishResult,
    participants: Participants,
    contract: &ContractConfig,
    nft: &NftConfig,
) -> Vec<PlannedCall> {
    let global = published.global_object_id.as_str();
    let merchant = participants.merchant.to_string();
    let user = participants.user.to_string();
    let call = |step: Step| {
        MoveCall::new(
            published.module_id.clone(),
            &contract.module_name,
            step.function(),
        )
        .arg(global)
    };

    let mut plan = vec![
        PlannedCall {
            step: Step::AddMerchant,
            signer: Role::Admin,
            call: call(Step::AddMerchant).arg(merchant.as_str()),
        },
        PlannedCall {
            step: Step::Airdrop,
            signer: Role::Admin,
            call: call(Step::Airdrop)
                .arg(user.as_str())
                .arg(nft.name.as_str())
                .arg(nft.description.as_str())
                .arg(nft.image_url_initial.as_str()),
        },
    ];

    match contract.redeem_flow {
        RedeemFlow::TwoPhase => {
            plan.push(PlannedCall {
                step: Step::RedeemRequest,
                signer: Role::User,
                call: call(Step::RedeemRequest).arg(merchant.as_str()),
            });
            plan.push(PlannedCall {
                step: Step::RedeemConfirm,
                signer: Role::Merchant,
                call: call(Step::RedeemConfirm)
                    .arg(user.as_str())
                    .arg(nft.image_url_redeemed.as_str()),
            });
        }
        RedeemFlow::Direct => {
            plan.push(PlannedCall {
                step: Step::Redeem,
                signer: Role::Merchant,
                call: call(Step::Redeem)
                    .arg(user.as_str())
                    .arg(nft.image_url_redeemed.as_str()),
            });
        }
    }

    plan
}

/// Execute planned calls strictly in order.
///
/// Each call is awaited before the next is built. The first failure is
/// returned; no compensation is attempted for steps already applied.
pub async fn execute_plan(
    client: &SuiClient,
    identities: &Identities,
    gas_budget: u64,
    plan: Vec<PlannedCall>,
) -> DriverResult<Vec<StepOutcome>> {
    let mut outcomes = Vec::with_capacity(plan.len());

    for planned in plan {
        let identity = identities.get(planned.signer);
        tracing::info!(
            step = %planned.step,
            signer = %planned.signer,
            signer_address = %identity.address(),
            "Executing Move call"
        );

        let signer = TxSigner::new(client, identity, gas_budget);
        let certified = signer.execute_move_call(&planned.call).await?;
        print_json(planned.step.result_label(), &certified);
        ensure_success(planned.step, &certified)?;

        tracing::info!(step = %planned.step, digest = certified.digest(), "Step complete");

        outcomes.push(StepOutcome {
            step: planned.step,
            digest: certified.digest().to_string(),
            effects: certified,
        });
    }

    Ok(outcomes)
}
