use std::{fmt, str::FromStr};

use alloy::primitives::Address;
use tracing::info;

use crate::{
    config::Settings,
    contracts::TokenContracts,
    error::DispatchError,
    gas::GasEstimator,
    operations::{self, CrossChainReport, DeployReport},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Deploy,
    DeployRemote,
    Transfer,
}

impl FromStr for Operation {
    type Err = DispatchError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "registerAndDeploy" | "deploy" => Ok(Self::Deploy),
            "deployToRemoteChain" | "deploy-remote" => Ok(Self::DeployRemote),
            "transferTokens" | "transfer" => Ok(Self::Transfer),
            other => Err(DispatchError::UnknownOperation(other.to_owned())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deploy => write!(f, "registerAndDeploy"),
            Self::DeployRemote => write!(f, "deployToRemoteChain"),
            Self::Transfer => write!(f, "transferTokens"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Deployed(DeployReport),
    RemoteDeployment(CrossChainReport),
    Transfer(CrossChainReport),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deployed(report) => write!(f, "{report}"),
            Self::RemoteDeployment(report) => write!(f, "Remote deployment submitted\n{report}"),
            Self::Transfer(report) => write!(f, "Transfer submitted\n{report}"),
        }
    }
}

/// Runs exactly one operation to completion.
///
/// Operation specific inputs are checked before the operation starts, so a
/// missing salt or recipient never gets as far as a remote call.
pub async fn dispatch<C, G>(
    operation: Operation,
    contracts: &C,
    gas: &G,
    settings: &Settings,
    signer: Address,
) -> Result<Report, DispatchError>
where
    C: TokenContracts,
    G: GasEstimator,
{
    info!(%operation, %signer, "running operation");

    let report = match operation {
        Operation::Deploy => {
            Report::Deployed(operations::deploy(contracts, settings, signer).await?)
        }
        Operation::DeployRemote => {
            let salt = settings.remote_salt()?;
            Report::RemoteDeployment(
                operations::deploy_remote(contracts, gas, settings, signer, salt).await?,
            )
        }
        Operation::Transfer => {
            let request = settings.transfer_request()?;
            Report::Transfer(operations::transfer(contracts, gas, settings, &request).await?)
        }
    };

    Ok(report)
}

#[cfg(test)]
mod tests {
    use alloy::primitives::U256;

    use super::*;
    use crate::{
        contracts::mock::{Call, RecordingContracts},
        error::ConfigError,
        gas::mock::FixedGas,
        operations::tests::{settings, transfer_request, SALT, SIGNER},
    };

    #[test]
    fn parses_script_and_cli_names() {
        for (name, expected) in [
            ("registerAndDeploy", Operation::Deploy),
            ("deploy", Operation::Deploy),
            ("deployToRemoteChain", Operation::DeployRemote),
            ("deploy-remote", Operation::DeployRemote),
            ("transferTokens", Operation::Transfer),
            ("transfer", Operation::Transfer),
        ] {
            assert_eq!(name.parse::<Operation>().unwrap(), expected);
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        for name in ["", "mint", "RegisterAndDeploy", " deploy", "transfer\n"] {
            let err = name.parse::<Operation>().unwrap_err();
            assert!(matches!(err, DispatchError::UnknownOperation(_)));
        }
        assert_eq!(
            "mint".parse::<Operation>().unwrap_err().to_string(),
            "Unknown function: mint"
        );
    }

    #[tokio::test]
    async fn deploy_runs_only_the_deploy_calls() {
        let contracts = RecordingContracts::default();
        let gas = FixedGas::new(U256::from(1u64));

        let report = dispatch(Operation::Deploy, &contracts, &gas, &settings(), SIGNER)
            .await
            .unwrap();

        assert!(matches!(report, Report::Deployed(_)));
        assert_eq!(gas.requests(), 0);
        assert_eq!(contracts.writes().len(), 1);
        assert!(matches!(contracts.writes()[0], Call::DeployInterchainToken { .. }));
    }

    #[tokio::test]
    async fn deploy_remote_runs_only_the_remote_deployment() {
        let contracts = RecordingContracts::default();
        let gas = FixedGas::new(U256::from(1u64));

        let report = dispatch(Operation::DeployRemote, &contracts, &gas, &settings(), SIGNER)
            .await
            .unwrap();

        assert!(matches!(report, Report::RemoteDeployment(_)));
        assert_eq!(gas.requests(), 1);
        assert_eq!(contracts.calls().len(), 1);
        assert!(matches!(
            contracts.calls()[0],
            Call::DeployRemoteInterchainToken { salt, .. } if salt == SALT
        ));
    }

    #[tokio::test]
    async fn transfer_runs_only_the_transfer() {
        let contracts = RecordingContracts::default();
        let gas = FixedGas::new(U256::from(1u64));
        let mut settings = settings();
        let request = transfer_request();
        settings.transfer.token = Some(request.token);
        settings.transfer.recipient = Some(request.recipient);

        let report = dispatch(Operation::Transfer, &contracts, &gas, &settings, SIGNER)
            .await
            .unwrap();

        assert!(matches!(report, Report::Transfer(_)));
        assert_eq!(gas.requests(), 1);
        assert_eq!(contracts.calls().len(), 1);
        assert!(matches!(
            contracts.calls()[0],
            Call::InterchainTransfer { amount, .. } if amount == request.amount
        ));
    }

    #[tokio::test]
    async fn malformed_amount_stops_the_transfer_before_any_remote_call() {
        let contracts = RecordingContracts::default();
        let gas = FixedGas::new(U256::from(1u64));
        let mut settings = settings();
        let request = transfer_request();
        settings.transfer.token = Some(request.token);
        settings.transfer.recipient = Some(request.recipient);
        settings.transfer.amount = "lots".to_owned();

        let err = dispatch(Operation::Transfer, &contracts, &gas, &settings, SIGNER)
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::Config(ConfigError::InvalidAmount { .. })));
        assert_eq!(gas.requests(), 0);
        assert!(contracts.calls().is_empty());

        // the same settings still deploy
        dispatch(Operation::Deploy, &contracts, &gas, &settings, SIGNER).await.unwrap();
    }

    #[tokio::test]
    async fn missing_inputs_stop_before_any_remote_call() {
        let contracts = RecordingContracts::default();
        let gas = FixedGas::new(U256::from(1u64));
        let mut settings = settings();
        settings.salt = None;

        let err = dispatch(Operation::DeployRemote, &contracts, &gas, &settings, SIGNER)
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Config(ConfigError::Missing("SALT"))));

        let err = dispatch(Operation::Transfer, &contracts, &gas, &settings, SIGNER)
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Config(ConfigError::Missing(_))));

        assert_eq!(gas.requests(), 0);
        assert!(contracts.calls().is_empty());
    }
}
