use alloy::{
    network::{Ethereum, EthereumWallet},
    providers::{Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::{
        http::{Client, Http},
        Transport,
    },
};
use reqwest::Url;
use tracing::debug;

use crate::error::{ConfigError, DispatchError, RemoteCallError};

/// Provider that fills nonce, gas and chain id and signs with `signer`.
pub fn connect(
    rpc_url: Url,
    signer: PrivateKeySigner,
) -> impl Provider<Http<Client>, Ethereum> + Clone {
    let wallet = EthereumWallet::from(signer);
    ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(wallet)
        .on_http(rpc_url)
}

/// Fails unless the node serves the chain the contract addresses were configured for.
pub async fn verify_chain_id<P, T>(provider: &P, expected: u64) -> Result<(), DispatchError>
where
    P: Provider<T, Ethereum>,
    T: Transport + Clone,
{
    let actual = provider
        .get_chain_id()
        .await
        .map_err(RemoteCallError::from)?;
    debug!(chain_id = actual, "connected to chain");

    if actual != expected {
        return Err(ConfigError::ChainMismatch { expected, actual }.into());
    }
    Ok(())
}
