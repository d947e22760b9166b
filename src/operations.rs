//! The three interchain token operations.
//!
//! Each operation runs its remote calls in order and stops at the first error:
//! nothing is retried and nothing is rolled back. Operations that pay for
//! cross-chain execution estimate the fee first, so a failed estimate means no
//! transaction is ever submitted.

use std::fmt;

use alloy::primitives::{Address, TxHash, B256, U256};
use futures_util::future::try_join;
use rand::{rngs::OsRng, RngCore};
use tracing::info;

use crate::{
    config::{Settings, TransferRequest},
    contracts::TokenContracts,
    error::DispatchError,
    gas::{GasEstimator, GasQuery},
};

/// What a finished deploy learned and submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    pub token_id: B256,
    pub token_address: Address,
    pub tx_hash: TxHash,
    pub salt: B256,
    pub token_manager: Address,
}

/// A submitted cross-chain transaction, with its Axelarscan GMP page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossChainReport {
    pub tx_hash: TxHash,
    pub fee: U256,
    pub explorer_link: String,
}

/// Fresh salt from the OS random number generator.
pub fn random_salt() -> B256 {
    let mut salt = [0u8; 32];
    OsRng.fill_bytes(&mut salt);
    B256::from(salt)
}

pub async fn deploy<C: TokenContracts>(
    contracts: &C,
    settings: &Settings,
    signer: Address,
) -> Result<DeployReport, DispatchError> {
    deploy_with_salt(contracts, settings, signer, random_salt()).await
}

pub(crate) async fn deploy_with_salt<C: TokenContracts>(
    contracts: &C,
    settings: &Settings,
    signer: Address,
    salt: B256,
) -> Result<DeployReport, DispatchError> {
    let token_id = contracts.interchain_token_id(signer, salt).await?;
    info!(%token_id, %salt, "derived interchain token id");

    let (token_address, token_manager) = try_join(
        contracts.interchain_token_address(token_id),
        contracts.token_manager_address(token_id),
    )
    .await?;

    let tx_hash = contracts
        .deploy_interchain_token(salt, &settings.token, signer)
        .await?;
    info!(%tx_hash, %token_address, symbol = %settings.token.symbol, "submitted token deployment");

    Ok(DeployReport {
        token_id,
        token_address,
        tx_hash,
        salt,
        token_manager,
    })
}

pub async fn deploy_remote<C: TokenContracts, G: GasEstimator>(
    contracts: &C,
    gas: &G,
    settings: &Settings,
    signer: Address,
    salt: B256,
) -> Result<CrossChainReport, DispatchError> {
    let route = &settings.route;
    let fee = estimate_fee(gas, settings).await?;

    let tx_hash = contracts
        .deploy_remote_interchain_token(
            &route.source_chain,
            salt,
            signer,
            &route.destination_chain,
            fee,
        )
        .await?;
    info!(%tx_hash, destination = %route.destination_chain, "submitted remote deployment");

    Ok(CrossChainReport {
        tx_hash,
        fee,
        explorer_link: gmp_link(&settings.explorer_url, tx_hash),
    })
}

pub async fn transfer<C: TokenContracts, G: GasEstimator>(
    contracts: &C,
    gas: &G,
    settings: &Settings,
    request: &TransferRequest,
) -> Result<CrossChainReport, DispatchError> {
    let destination = &settings.route.destination_chain;
    let fee = estimate_fee(gas, settings).await?;

    let tx_hash = contracts
        .interchain_transfer(
            request.token,
            destination,
            request.recipient,
            request.amount,
            &request.metadata,
            fee,
        )
        .await?;
    info!(%tx_hash, %destination, amount = %request.amount, "submitted interchain transfer");

    Ok(CrossChainReport {
        tx_hash,
        fee,
        explorer_link: gmp_link(&settings.explorer_url, tx_hash),
    })
}

async fn estimate_fee<G: GasEstimator>(
    gas: &G,
    settings: &Settings,
) -> Result<U256, DispatchError> {
    let query = GasQuery {
        source_chain: &settings.route.source_chain,
        destination_chain: &settings.route.destination_chain,
        token_symbol: &settings.gas.token_symbol,
        gas_limit: settings.gas.gas_limit,
        multiplier: settings.gas.multiplier,
    };
    let fee = gas.estimate(&query).await?;
    info!(%fee, "estimated cross-chain gas fee");

    Ok(fee)
}

fn gmp_link(explorer_url: &str, tx_hash: TxHash) -> String {
    format!("{}/gmp/{tx_hash}", explorer_url.trim_end_matches('/'))
}

impl fmt::Display for DeployReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deployed Token ID: {}", self.token_id)?;
        writeln!(f, "Token Address: {}", self.token_address)?;
        writeln!(f, "Transaction Hash: {}", self.tx_hash)?;
        writeln!(f, "salt: {}", self.salt)?;
        write!(f, "Expected Token Manager Address: {}", self.token_manager)
    }
}

impl fmt::Display for CrossChainReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Transaction Hash: {}", self.tx_hash)?;
        writeln!(f, "Gas Paid: {} wei", self.fee)?;
        write!(f, "Track: {}", self.explorer_link)
    }
}
