//! Deploys `UniswapV3PositionManager` with the configured position manager
//! address as its constructor argument.
use std::{path::PathBuf, process::ExitCode};

use alloy::{signers::local::PrivateKeySigner, transports::http::reqwest::Url};
use clap::Parser;
use e2e::{
    Account, ContractFactory, ARTIFACTS_DIR_ENV_VAR_NAME, DEFAULT_RPC_URL,
    RPC_URL_ENV_VAR_NAME,
};
use eyre::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};
use uv3_position_manager::{
    constructor_address, PositionManager, ADDRESS_ENV_VAR_NAME, CONTRACT_NAME,
};

#[derive(Parser, Debug)]
#[command(about = "Deploy the UniswapV3PositionManager contract")]
struct Commands {
    /// Uniswap V3 position manager passed to the constructor
    #[arg(long, env = ADDRESS_ENV_VAR_NAME)]
    address: Option<String>,

    /// JSON-RPC endpoint of the target chain
    #[arg(long, env = RPC_URL_ENV_VAR_NAME, default_value = DEFAULT_RPC_URL)]
    rpc_url: Url,

    /// Private key of the deploying account
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: PrivateKeySigner,

    /// Directory holding the compiled contract artifacts
    #[arg(long, env = ARTIFACTS_DIR_ENV_VAR_NAME, default_value = "artifacts")]
    artifacts: PathBuf,

    /// Confirmations to wait for before reporting the deployment
    #[arg(long, env = "CONFIRMATIONS", default_value_t = 1)]
    confirmations: u64,
}

async fn run(args: Commands) -> Result<()> {
    let position_manager = constructor_address(args.address.as_deref())?;

    info!("Deploying contract...");

    let factory =
        ContractFactory::from_artifacts(&args.artifacts, CONTRACT_NAME)
            .wrap_err("failed to load contract factory")?;
    let account = Account::from_signer(args.private_key, args.rpc_url);
    info!(deployer = %account.address(), url = account.url(), "using account");

    let deployer = account.as_deployer().with_confirmations(args.confirmations);
    let contract = PositionManager::deploy(deployer, &factory, position_manager)
        .await
        .wrap_err(format!("failed to deploy {CONTRACT_NAME}"))?;

    info!("{CONTRACT_NAME} deployed to: {}", contract.address());
    Ok(())
}

/// Help and version requests aren't failures; anything else clap rejects is a
/// configuration error.
fn parse_exit_code(e: &clap::Error) -> ExitCode {
    if e.use_stderr() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn exit_code(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:?}");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "info,alloy_rpc_client=off,alloy_transport_http=off,hyper_util=off"
            .into()
    });
    let fmt_layer = fmt::Layer::default()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter);
    tracing_subscriber::registry().with(fmt_layer).init();

    let args = match Commands::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return parse_exit_code(&e);
        }
    };

    exit_code(run(args).await)
}
