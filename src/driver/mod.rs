//! Demo pipeline subsystem.
//!
//! # Data Flow
//! ```text
//! Driver::run
//!     → fund_identities (faucet, only when configured)
//!     → publish.rs      (module bytes → PublishResult)
//!     → actions.rs      (add_merchant → airdrop → redeem_request → redeem_confirm)
//!     → queries.rs      (global object → NFT table pages → user's NFT)
//! ```
//!
//! # Design Decisions
//! - Strictly sequential: every remote call is awaited before the next
//! - Fail fast: the first error ends the run, earlier steps stay applied
//! - The client, identities and config are passed in, never global

pub mod actions;
pub mod error;
pub mod pagination;
pub mod publish;
pub mod queries;

use serde::Serialize;
use std::path::Path;

use crate::blockchain::faucet::FaucetClient;
use crate::blockchain::types::FaucetResponse;
use crate::blockchain::wallet::{Identities, Role};
use crate::blockchain::SuiClient;
use crate::config::DriverConfig;
use crate::observability::print_json;

pub use actions::{plan_calls, Participants, PlannedCall, Step, StepOutcome};
pub use error::{DriverError, DriverResult};
pub use publish::PublishResult;
pub use queries::QueryReport;

/// Outcome of a full pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub published: PublishResult,
    pub steps: Vec<StepOutcome>,
    pub queries: QueryReport,
}

/// Execution context shared by every pipeline step.
pub struct Driver<'a> {
    client: &'a SuiClient,
    identities: &'a Identities,
    config: &'a DriverConfig,
}

impl<'a> Driver<'a> {
    pub fn new(client: &'a SuiClient, identities: &'a Identities, config: &'a DriverConfig) -> Self {
        Self {
            client,
            identities,
            config,
        }
    }

    /// Request faucet funds for one identity.
    pub async fn fund(&self, role: Role) -> DriverResult<Option<FaucetResponse>> {
        let Some(faucet_url) = &self.config.rpc.faucet_url else {
            tracing::info!(role = %role, "No faucet configured, skipping funding");
            return Ok(None);
        };

        let faucet = FaucetClient::new(faucet_url, self.config.rpc.timeout_secs)?;
        let reply = faucet
            .request_funds(self.identities.get(role).address())
            .await?;
        print_json("requestSuiFromFaucet", &reply);
        Ok(Some(reply))
    }

    /// Fund admin, then merchant, when a faucet is configured.
    pub async fn fund_identities(&self) -> DriverResult<()> {
        if self.config.rpc.faucet_url.is_none() {
            return Ok(());
        }
        self.fund(Role::Admin).await?;
        self.fund(Role::Merchant).await?;
        Ok(())
    }

    /// Publish the configured module as admin.
    pub async fn publish(&self) -> DriverResult<PublishResult> {
        let contract = &self.config.contract;
        publish::publish(
            self.client,
            &self.identities.admin,
            Path::new(&contract.module_path),
            contract.gas_budget,
        )
        .await
    }

    /// Run the business calls against a published package.
    pub async fn interact(&self, published: &PublishResult) -> DriverResult<Vec<StepOutcome>> {
        let plan = plan_calls(
            published,
            Participants::from(self.identities),
            &self.config.contract,
            &self.config.nft,
        );
        actions::execute_plan(
            self.client,
            self.identities,
            self.config.contract.gas_budget,
            plan,
        )
        .await
    }

    /// Query state left behind by the business calls.
    pub async fn query(&self, published: &PublishResult) -> DriverResult<QueryReport> {
        queries::run_queries(
            self.client,
            published,
            self.identities.user.address(),
            self.config.contract.page_limit,
        )
        .await
    }

    /// Run the whole pipeline.
    pub async fn run(&self) -> DriverResult<RunSummary> {
        tracing::info!("-----start-----");
        tracing::info!(address = %self.identities.admin.address(), "admin address");
        tracing::info!(address = %self.identities.merchant.address(), "merchant address");

        self.fund_identities().await?;

        let published = self.publish().await?;
        print_json("PublishResult:", &published);

        let steps = self.interact(&published).await?;
        let queries = self.query(&published).await?;

        tracing::info!("-----end-----");
        Ok(RunSummary {
            published,
            steps,
            queries,
        })
    }
}
