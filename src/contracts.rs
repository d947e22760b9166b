use std::marker::PhantomData;

use alloy::{
    network::Ethereum,
    primitives::{Address, Bytes, TxHash, B256, U256},
    providers::Provider,
    transports::Transport,
};
use tracing::debug;

use crate::{
    bindings::{recipient_bytes, InterchainToken, InterchainTokenFactory, InterchainTokenService},
    config::{ContractAddresses, TokenMetadata},
    error::RemoteCallError,
};

/// The on-chain methods the operations need, one async call per contract method.
///
/// Read-only methods return the decoded value. State-changing methods return the
/// hash of the submitted transaction without waiting for it to be mined.
pub trait TokenContracts {
    async fn interchain_token_id(
        &self,
        deployer: Address,
        salt: B256,
    ) -> Result<B256, RemoteCallError>;

    async fn interchain_token_address(&self, token_id: B256) -> Result<Address, RemoteCallError>;

    async fn token_manager_address(&self, token_id: B256) -> Result<Address, RemoteCallError>;

    async fn deploy_interchain_token(
        &self,
        salt: B256,
        token: &TokenMetadata,
        minter: Address,
    ) -> Result<TxHash, RemoteCallError>;

    async fn deploy_remote_interchain_token(
        &self,
        source_chain: &str,
        salt: B256,
        minter: Address,
        destination_chain: &str,
        gas_value: U256,
    ) -> Result<TxHash, RemoteCallError>;

    async fn interchain_transfer(
        &self,
        token: Address,
        destination_chain: &str,
        recipient: Address,
        amount: U256,
        metadata: &Bytes,
        gas_value: U256,
    ) -> Result<TxHash, RemoteCallError>;
}

/// [`TokenContracts`] backed by an alloy provider that carries the signing wallet.
pub struct AlloyContracts<P, T> {
    provider: P,
    addresses: ContractAddresses,
    _phantom: PhantomData<T>,
}

impl<P, T> AlloyContracts<P, T>
where
    P: Provider<T, Ethereum>,
    T: Transport + Clone,
{
    pub fn new(provider: P, addresses: ContractAddresses) -> Self {
        Self {
            provider,
            addresses,
            _phantom: PhantomData,
        }
    }

    fn factory(&self) -> InterchainTokenFactory::InterchainTokenFactoryInstance<T, &P, Ethereum> {
        InterchainTokenFactory::new(self.addresses.token_factory, &self.provider)
    }

    fn service(&self) -> InterchainTokenService::InterchainTokenServiceInstance<T, &P, Ethereum> {
        InterchainTokenService::new(self.addresses.token_service, &self.provider)
    }
}

impl<P, T> TokenContracts for AlloyContracts<P, T>
where
    P: Provider<T, Ethereum>,
    T: Transport + Clone,
{
    async fn interchain_token_id(
        &self,
        deployer: Address,
        salt: B256,
    ) -> Result<B256, RemoteCallError> {
        let id = self
            .factory()
            .interchainTokenId(deployer, salt)
            .call()
            .await
            .map_err(RemoteCallError::contract("interchainTokenId"))?
            ._0;
        Ok(id)
    }

    async fn interchain_token_address(&self, token_id: B256) -> Result<Address, RemoteCallError> {
        let address = self
            .service()
            .interchainTokenAddress(token_id)
            .call()
            .await
            .map_err(RemoteCallError::contract("interchainTokenAddress"))?
            ._0;
        Ok(address)
    }

    async fn token_manager_address(&self, token_id: B256) -> Result<Address, RemoteCallError> {
        let address = self
            .service()
            .tokenManagerAddress(token_id)
            .call()
            .await
            .map_err(RemoteCallError::contract("tokenManagerAddress"))?
            ._0;
        Ok(address)
    }

    async fn deploy_interchain_token(
        &self,
        salt: B256,
        token: &TokenMetadata,
        minter: Address,
    ) -> Result<TxHash, RemoteCallError> {
        let tx = self
            .factory()
            .deployInterchainToken(
                salt,
                token.name.clone(),
                token.symbol.clone(),
                token.decimals,
                token.initial_supply,
                minter,
            )
            .send()
            .await
            .map_err(RemoteCallError::contract("deployInterchainToken"))?;
        debug!(tx_hash = %tx.tx_hash(), "submitted deployInterchainToken");

        Ok(*tx.tx_hash())
    }

    async fn deploy_remote_interchain_token(
        &self,
        source_chain: &str,
        salt: B256,
        minter: Address,
        destination_chain: &str,
        gas_value: U256,
    ) -> Result<TxHash, RemoteCallError> {
        let tx = self
            .factory()
            .deployRemoteInterchainToken(
                source_chain.to_owned(),
                salt,
                minter,
                destination_chain.to_owned(),
                gas_value,
            )
            .value(gas_value)
            .send()
            .await
            .map_err(RemoteCallError::contract("deployRemoteInterchainToken"))?;
        debug!(tx_hash = %tx.tx_hash(), "submitted deployRemoteInterchainToken");

        Ok(*tx.tx_hash())
    }

    async fn interchain_transfer(
        &self,
        token: Address,
        destination_chain: &str,
        recipient: Address,
        amount: U256,
        metadata: &Bytes,
        gas_value: U256,
    ) -> Result<TxHash, RemoteCallError> {
        let token = InterchainToken::new(token, &self.provider);
        let tx = token
            .interchainTransfer(
                destination_chain.to_owned(),
                recipient_bytes(recipient),
                amount,
                metadata.clone(),
            )
            .value(gas_value)
            .send()
            .await
            .map_err(RemoteCallError::contract("interchainTransfer"))?;
        debug!(tx_hash = %tx.tx_hash(), "submitted interchainTransfer");

        Ok(*tx.tx_hash())
    }
}
