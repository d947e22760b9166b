//! Cross-chain gas fee estimation through the Axelarscan API.

use std::time::Duration;

use alloy::primitives::U256;
use reqwest::{Client, Url};
use serde::Serialize;
use tracing::debug;

use crate::error::{ConfigError, EstimationError};

/// One fee quote request.
#[derive(Debug, Clone, PartialEq)]
pub struct GasQuery<'a> {
    pub source_chain: &'a str,
    pub destination_chain: &'a str,
    pub token_symbol: &'a str,
    pub gas_limit: u64,
    pub multiplier: f64,
}

pub trait GasEstimator {
    /// Fee in wei of the source chain's native token.
    async fn estimate(&self, query: &GasQuery<'_>) -> Result<U256, EstimationError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EstimateGasFeeRequest<'a> {
    source_chain: String,
    destination_chain: String,
    source_token_symbol: &'a str,
    gas_limit: String,
    gas_multiplier: f64,
}

impl<'a> From<&GasQuery<'a>> for EstimateGasFeeRequest<'a> {
    // Axelarscan identifies chains by lowercase id ("fantom"), ITS by display name ("Fantom").
    fn from(query: &GasQuery<'a>) -> Self {
        Self {
            source_chain: query.source_chain.to_lowercase(),
            destination_chain: query.destination_chain.to_lowercase(),
            source_token_symbol: query.token_symbol,
            gas_limit: query.gas_limit.to_string(),
            gas_multiplier: query.multiplier,
        }
    }
}

pub struct AxelarGasApi {
    client: Client,
    endpoint: Url,
}

impl AxelarGasApi {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let endpoint = format!("{}/gmp/estimateGasFee", api_url.trim_end_matches('/'))
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidGasApi(e.to_string()))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::InvalidGasApi(e.to_string()))?;

        Ok(Self { client, endpoint })
    }
}

impl GasEstimator for AxelarGasApi {
    async fn estimate(&self, query: &GasQuery<'_>) -> Result<U256, EstimationError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&EstimateGasFeeRequest::from(query))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(EstimationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let fee = parse_fee(&body)?;
        debug!(
            %fee,
            source = query.source_chain,
            destination = query.destination_chain,
            "estimated gas fee"
        );
        Ok(fee)
    }
}

/// The endpoint answers with the fee as a decimal string, either bare or JSON-quoted.
fn parse_fee(body: &str) -> Result<U256, EstimationError> {
    let raw = body.trim().trim_matches('"');
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EstimationError::InvalidResponse(body.to_owned()));
    }

    U256::from_str_radix(raw, 10).map_err(|_| EstimationError::InvalidResponse(body.to_owned()))
}

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Answers a fixed fee, or fails every time when built with [`FixedGas::failing`].
    pub struct FixedGas {
        fee: Option<U256>,
        requests: AtomicUsize,
    }

    impl FixedGas {
        pub fn new(fee: U256) -> Self {
            Self {
                fee: Some(fee),
                requests: AtomicUsize::new(0),
            }
        }

        pub fn failing() -> Self {
            Self {
                fee: None,
                requests: AtomicUsize::new(0),
            }
        }

        pub fn requests(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }
    }

    impl GasEstimator for FixedGas {
        async fn estimate(&self, _query: &GasQuery<'_>) -> Result<U256, EstimationError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            self.fee
                .ok_or_else(|| EstimationError::InvalidResponse("unavailable".to_owned()))
        }
    }
}
