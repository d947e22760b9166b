use alloy::{
    primitives::{Address, Bytes},
    sol,
};

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface InterchainTokenFactory {
        function interchainTokenId(address deployer, bytes32 salt) external view returns (bytes32);

        function deployInterchainToken(
            bytes32 salt,
            string calldata name,
            string calldata symbol,
            uint8 decimals,
            uint256 initialSupply,
            address minter
        ) external payable returns (bytes32);

        function deployRemoteInterchainToken(
            string calldata originalChainName,
            bytes32 salt,
            address minter,
            string memory destinationChain,
            uint256 gasValue
        ) external payable returns (bytes32);
    }
);

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface InterchainTokenService {
        function interchainTokenAddress(bytes32 tokenId) external view returns (address);

        function tokenManagerAddress(bytes32 tokenId) external view returns (address);
    }
);

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface InterchainToken {
        function interchainTransfer(
            string calldata destinationChain,
            bytes calldata recipient,
            uint256 amount,
            bytes calldata metadata
        ) external payable;
    }
);

/// Encodes an EVM address the way ITS expects a `bytes` recipient: the raw 20 bytes.
pub fn recipient_bytes(recipient: Address) -> Bytes {
    Bytes::copy_from_slice(recipient.as_slice())
}
