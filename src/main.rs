use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::{Args, LogFormat};
use contracts::AlloyContracts;
use dispatch::{dispatch, Operation};
use gas::AxelarGasApi;

mod bindings;
mod chain;
mod config;
mod contracts;
mod dispatch;
mod error;
mod gas;
mod operations;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.log_format);

    // Resolve everything local before touching the network.
    let operation: Operation = args.function.parse()?;
    let settings = args.settings()?;
    let signer = args.signer()?;
    let signer_address = signer.address();
    let gas = AxelarGasApi::new(&args.gas_api_url, args.gas_timeout())?;

    let provider = chain::connect(args.rpc_url()?, signer);
    chain::verify_chain_id(&provider, args.chain_id).await?;

    let contracts = AlloyContracts::new(provider, settings.contracts);
    let report = dispatch(operation, &contracts, &gas, &settings, signer_address).await?;
    println!("{report}");

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
