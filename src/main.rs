//! Coffee NFT demo driver.
//!
//! Publishes the `coffee_nft` Move package to a Sui full node, runs the
//! merchant / airdrop / redeem flow, then queries the resulting state.
//!
//! # Pipeline
//!
//! ```text
//! .env / env vars / --config file
//!     → faucet (optional: admin, merchant)
//!     → publish          → PublishResult { moduleId, globalObjectId }
//!     → add_merchant → airdrop → redeem_request → redeem_confirm
//!     → queries          (global object, NFT table pages, user's NFT)
//! ```
//!
//! Exits 0 on success and 1 on the first failure.

use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Instrument;

use coffee_nft::blockchain::wallet::{Identities, Role};
use coffee_nft::blockchain::{ObjectId, SuiClient};
use coffee_nft::config::{load_config, DriverConfig};
use coffee_nft::driver::{Driver, PublishResult};
use coffee_nft::observability::{init_logging, print_json};

#[derive(Parser)]
#[command(name = "coffee-nft")]
#[command(about = "Publish and exercise the coffee NFT Move package", long_about = None)]
struct Cli {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline (default)
    Run,
    /// Publish the module only
    Publish,
    /// Query state of an already published package
    Query {
        #[arg(long)]
        package: String,
        #[arg(long)]
        global: String,
    },
    /// Print the derived addresses
    Addresses,
    /// List objects owned by an identity
    Objects {
        #[arg(long, value_enum, default_value = "admin")]
        who: Role,
    },
    /// Request faucet funds for an identity
    Faucet {
        #[arg(long, value_enum, default_value = "admin")]
        who: Role,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.observability);

    let run_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("coffee_nft", %run_id);
    let command = cli.command.unwrap_or(Commands::Run);

    match execute(command, &config).instrument(span).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("error: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

async fn execute(command: Commands, config: &DriverConfig) -> Result<(), Box<dyn Error>> {
    let identities = Identities::from_env()?;
    let client = SuiClient::new(&config.rpc)?;
    let driver = Driver::new(&client, &identities, config);

    match command {
        Commands::Run => {
            driver.run().await?;
        }
        Commands::Publish => {
            driver.fund_identities().await?;
            let published = driver.publish().await?;
            print_json("PublishResult:", &published);
        }
        Commands::Query { package, global } => {
            let published = PublishResult {
                module_id: ObjectId(package),
                global_object_id: ObjectId(global),
            };
            driver.query(&published).await?;
        }
        Commands::Addresses => {
            for role in [Role::Admin, Role::Merchant, Role::User] {
                println!("{} address: {}", role, identities.get(role).address());
            }
        }
        Commands::Objects { who } => {
            let address = identities.get(who).address();
            let objects = client.get_objects_owned_by_address(address).await?;
            tracing::info!(role = %who, address = %address, count = objects.len(), "Owned objects");
            print_json("objects", &objects);
        }
        Commands::Faucet { who } => {
            if driver.fund(who).await?.is_none() {
                return Err("FAUCET_URL is not configured".into());
            }
        }
    }

    Ok(())
}
