//! Command line and environment configuration.
//!
//! Every flag falls back to an environment variable, and `main` loads a `.env`
//! file before parsing, so a run can be configured entirely from the environment:
//!
//! ```text
//! FUNCTION_NAME=registerAndDeploy PRIVATE_KEY=0x.. interchain-token
//! ```

use std::time::Duration;

use alloy::{
    primitives::{
        address,
        utils::{parse_units, ParseUnits},
        Address, Bytes, B256, U256,
    },
    signers::local::PrivateKeySigner,
};
use clap::{Parser, ValueEnum};

use crate::error::ConfigError;

/// Interchain token service testnet deployment.
pub const TOKEN_SERVICE_ADDRESS: Address = address!("B5FB4BE02232B1bBA4dC8f81dc24C26980dE9e3C");
pub const TOKEN_FACTORY_ADDRESS: Address = address!("83a93500d23Fbc3e82B410aD07A6a9F7A0670D66");

#[derive(Debug, Parser)]
#[command(name = "interchain-token", version, about = "Deploy and bridge interchain tokens")]
pub struct Args {
    /// Operation to run: registerAndDeploy, deployToRemoteChain or transferTokens
    #[arg(long = "function", env = "FUNCTION_NAME")]
    pub function: String,

    #[arg(long, env = "RPC_URL", default_value = "https://rpc.ankr.com/fantom_testnet")]
    pub rpc_url: String,

    /// Chain id the RPC endpoint must report
    #[arg(long, env = "CHAIN_ID", default_value_t = 4002)]
    pub chain_id: u64,

    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    #[arg(long, env = "ITS_SERVICE_ADDRESS", default_value_t = TOKEN_SERVICE_ADDRESS)]
    pub token_service: Address,

    #[arg(long, env = "ITS_FACTORY_ADDRESS", default_value_t = TOKEN_FACTORY_ADDRESS)]
    pub token_factory: Address,

    #[arg(long, env = "TOKEN_NAME", default_value = "My Interchain Token")]
    pub token_name: String,

    #[arg(long, env = "TOKEN_SYMBOL", default_value = "MIT")]
    pub token_symbol: String,

    #[arg(long, env = "TOKEN_DECIMALS", default_value_t = 18)]
    pub token_decimals: u8,

    /// Initial supply in whole tokens
    #[arg(long, env = "INITIAL_SUPPLY", default_value = "1000000")]
    pub initial_supply: String,

    /// Axelar name of the chain the RPC endpoint belongs to
    #[arg(long, env = "SOURCE_CHAIN", default_value = "Fantom")]
    pub source_chain: String,

    #[arg(long, env = "DESTINATION_CHAIN", default_value = "Polygon")]
    pub destination_chain: String,

    /// Salt of an already deployed token, for deployToRemoteChain
    #[arg(long, env = "SALT")]
    pub salt: Option<B256>,

    /// Interchain token to send, for transferTokens
    #[arg(long, env = "TOKEN_ADDRESS")]
    pub token_address: Option<Address>,

    #[arg(long, env = "RECIPIENT")]
    pub recipient: Option<Address>,

    /// Transfer amount in whole tokens
    #[arg(long, env = "AMOUNT", default_value = "100")]
    pub amount: String,

    /// Decimals of the token being transferred, used to scale AMOUNT
    #[arg(long, env = "TRANSFER_DECIMALS", default_value_t = 18)]
    pub transfer_decimals: u8,

    #[arg(long, env = "TRANSFER_METADATA", default_value = "0x")]
    pub metadata: Bytes,

    #[arg(long, env = "GAS_API_URL", default_value = "https://testnet.api.axelarscan.io")]
    pub gas_api_url: String,

    /// Symbol of the native token the gas is paid in
    #[arg(long, env = "GAS_TOKEN", default_value = "FTM")]
    pub gas_token: String,

    #[arg(long, env = "GAS_LIMIT", default_value_t = 7_000_000)]
    pub gas_limit: u64,

    #[arg(long, env = "GAS_MULTIPLIER", default_value_t = 1.1)]
    pub gas_multiplier: f64,

    #[arg(long, env = "GAS_TIMEOUT_SECS", default_value_t = 30)]
    pub gas_timeout_secs: u64,

    #[arg(long, env = "EXPLORER_URL", default_value = "https://testnet.axelarscan.io")]
    pub explorer_url: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    pub token_service: Address,
    pub token_factory: Address,
}

/// Metadata of the token created by a deploy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Base units, already scaled by `decimals`.
    pub initial_supply: U256,
}

/// Source and destination of cross-chain messages, by Axelar chain name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub source_chain: String,
    pub destination_chain: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GasParams {
    pub token_symbol: String,
    pub gas_limit: u64,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub token: Address,
    pub recipient: Address,
    /// Base units, already scaled by the token decimals.
    pub amount: U256,
    pub metadata: Bytes,
}

/// Everything the operations read, resolved from [`Args`].
#[derive(Debug, Clone)]
pub struct Settings {
    pub contracts: ContractAddresses,
    pub token: TokenMetadata,
    pub route: Route,
    pub gas: GasParams,
    pub explorer_url: String,
    pub salt: Option<B256>,
    pub transfer: TransferInputs,
}

/// Transfer inputs as given; checked only when a transfer actually runs.
#[derive(Debug, Clone, Default)]
pub struct TransferInputs {
    pub token: Option<Address>,
    pub recipient: Option<Address>,
    /// Whole tokens, unparsed.
    pub amount: String,
    pub decimals: u8,
    pub metadata: Bytes,
}

impl Args {
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let decimals = self.token_decimals;

        Ok(Settings {
            contracts: ContractAddresses {
                token_service: self.token_service,
                token_factory: self.token_factory,
            },
            token: TokenMetadata {
                name: self.token_name.clone(),
                symbol: self.token_symbol.clone(),
                decimals,
                initial_supply: whole_units(&self.initial_supply, decimals)?,
            },
            route: Route {
                source_chain: self.source_chain.clone(),
                destination_chain: self.destination_chain.clone(),
            },
            gas: GasParams {
                token_symbol: self.gas_token.clone(),
                gas_limit: self.gas_limit,
                multiplier: self.gas_multiplier,
            },
            explorer_url: self.explorer_url.clone(),
            salt: self.salt,
            transfer: TransferInputs {
                token: self.token_address,
                recipient: self.recipient,
                amount: self.amount.clone(),
                decimals: self.transfer_decimals,
                metadata: self.metadata.clone(),
            },
        })
    }

    pub fn signer(&self) -> Result<PrivateKeySigner, ConfigError> {
        let key = self
            .private_key
            .as_deref()
            .ok_or(ConfigError::Missing("PRIVATE_KEY"))?;
        key.trim()
            .parse::<PrivateKeySigner>()
            .map_err(|e| ConfigError::InvalidPrivateKey(e.to_string()))
    }

    pub fn rpc_url(&self) -> Result<reqwest::Url, ConfigError> {
        self.rpc_url
            .parse::<reqwest::Url>()
            .map_err(|e| ConfigError::InvalidRpcUrl(e.to_string()))
    }

    pub fn gas_timeout(&self) -> Duration {
        Duration::from_secs(self.gas_timeout_secs)
    }
}

impl Settings {
    pub fn remote_salt(&self) -> Result<B256, ConfigError> {
        self.salt.ok_or(ConfigError::Missing("SALT"))
    }

    pub fn transfer_request(&self) -> Result<TransferRequest, ConfigError> {
        let transfer = &self.transfer;
        let token = transfer.token.ok_or(ConfigError::Missing("TOKEN_ADDRESS"))?;
        let recipient = transfer.recipient.ok_or(ConfigError::Missing("RECIPIENT"))?;

        Ok(TransferRequest {
            token,
            recipient,
            amount: whole_units(&transfer.amount, transfer.decimals)?,
            metadata: transfer.metadata.clone(),
        })
    }
}

/// Scales a decimal amount of whole tokens to base units.
pub fn whole_units(value: &str, decimals: u8) -> Result<U256, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidAmount {
        value: value.to_owned(),
        reason,
    };

    match parse_units(value.trim(), decimals).map_err(|e| invalid(e.to_string()))? {
        ParseUnits::U256(amount) => Ok(amount),
        ParseUnits::I256(_) => Err(invalid("amount must not be negative".to_owned())),
    }
}
