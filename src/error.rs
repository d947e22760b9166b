use alloy::transports::TransportError;

/// Failure talking to the chain: transport errors, reverts and undecodable results alike.
#[derive(Debug, thiserror::Error)]
pub enum RemoteCallError {
    #[error("contract call `{method}` failed: {source}")]
    Contract {
        method: &'static str,
        #[source]
        source: alloy::contract::Error,
    },

    #[error("RPC request failed: {0}")]
    Transport(#[from] TransportError),
}

impl RemoteCallError {
    pub fn contract(method: &'static str) -> impl FnOnce(alloy::contract::Error) -> Self {
        move |source| Self::Contract { method, source }
    }
}

/// Failure of the external gas fee API.
#[derive(Debug, thiserror::Error)]
pub enum EstimationError {
    #[error("gas API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("gas API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("gas API returned an invalid fee amount: {0:?}")]
    InvalidResponse(String),
}

/// Invalid or missing settings, detected before any remote call is made.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid amount {value:?}: {reason}")]
    InvalidAmount { value: String, reason: String },

    #[error("invalid gas API settings: {0}")]
    InvalidGasApi(String),

    #[error("invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("connected to chain {actual}, expected chain {expected}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Everything the dispatcher can surface to `main`.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Unknown function: {0}")]
    UnknownOperation(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    RemoteCall(#[from] RemoteCallError),

    #[error(transparent)]
    Estimation(#[from] EstimationError),
}
