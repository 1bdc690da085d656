//! The `MyEpicNFT` contract as seen from the client.
use std::future::Future;

use alloy::{
    network::{Ethereum, ReceiptResponse},
    primitives::{Address, TxHash, U256},
    providers::{DynProvider, PendingTransactionBuilder},
    sol,
};
use futures::{stream::BoxStream, StreamExt};

use crate::Error;

sol!(
    #[sol(rpc)]
    contract MyEpicNFT {
        #[derive(Debug)]
        function getCurrentNFTCount() public view returns (uint256);

        function makeAnEpicNFT() public;

        #[derive(Debug, PartialEq)]
        event NewEpicNFTMinted(address sender, uint256 tokenId);
    }
);

/// A decoded `NewEpicNFTMinted` event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintEvent {
    /// Account the token was minted for.
    pub sender: Address,
    /// Id of the new token. Ids are sequential, so this is also the number
    /// of tokens minted so far.
    pub token_id: u64,
}

impl TryFrom<MyEpicNFT::NewEpicNFTMinted> for MintEvent {
    type Error = Error;

    fn try_from(event: MyEpicNFT::NewEpicNFTMinted) -> Result<Self, Error> {
        Ok(MintEvent { sender: event.sender, token_id: to_u64(event.tokenId)? })
    }
}

/// Stream of mint events, in the order the node delivers them.
pub type MintEvents = BoxStream<'static, Result<MintEvent, Error>>;

/// A submitted mint transaction.
pub trait PendingMint: Send + 'static {
    /// Hash of the submitted transaction.
    fn hash(&self) -> TxHash;

    /// Wait until the transaction is included in a block.
    ///
    /// # Errors
    ///
    /// May fail if the node drops the transaction or it reverts.
    fn wait(self) -> impl Future<Output = Result<TxHash, Error>> + Send;
}

/// Remote operations of the mint contract.
pub trait MintContract: Send + Sync + 'static {
    /// Handle returned by [`MintContract::make_an_epic_nft`].
    type Pending: PendingMint;

    /// Read the number of tokens minted so far.
    ///
    /// # Errors
    ///
    /// May fail if the call fails or the count does not fit in a `u64`.
    fn current_count(&self) -> impl Future<Output = Result<u64, Error>> + Send;

    /// Submit a mint transaction. Returns once the wallet has signed and the
    /// node has accepted it, before it is mined.
    ///
    /// # Errors
    ///
    /// May fail if signing or submission fails.
    fn make_an_epic_nft(
        &self,
    ) -> impl Future<Output = Result<Self::Pending, Error>> + Send;

    /// Register a listener for `NewEpicNFTMinted` events.
    ///
    /// # Errors
    ///
    /// May fail if the node refuses to install the filter.
    fn minted_events(
        &self,
    ) -> impl Future<Output = Result<MintEvents, Error>> + Send;
}

/// [`MintContract`] backed by an `alloy` provider.
#[derive(Clone)]
pub struct RpcMintContract {
    inner: MyEpicNFT::MyEpicNFTInstance<DynProvider>,
}

impl RpcMintContract {
    /// Bind the contract at `address` to `provider`.
    #[must_use]
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self { inner: MyEpicNFT::new(address, provider) }
    }

    /// Address of the bound contract.
    #[must_use]
    pub fn address(&self) -> Address {
        *self.inner.address()
    }
}

impl MintContract for RpcMintContract {
    type Pending = RpcPendingMint;

    async fn current_count(&self) -> Result<u64, Error> {
        let count = self.inner.getCurrentNFTCount().call().await?;
        to_u64(count)
    }

    async fn make_an_epic_nft(&self) -> Result<RpcPendingMint, Error> {
        let pending = self.inner.makeAnEpicNFT().send().await?;
        Ok(RpcPendingMint(pending))
    }

    async fn minted_events(&self) -> Result<MintEvents, Error> {
        let poller = self.inner.NewEpicNFTMinted_filter().watch().await?;
        let events = poller.into_stream().map(|item| {
            let (event, _log) = item?;
            MintEvent::try_from(event)
        });
        Ok(events.boxed())
    }
}

/// [`PendingMint`] wrapping an `alloy` pending transaction.
pub struct RpcPendingMint(PendingTransactionBuilder<Ethereum>);

impl PendingMint for RpcPendingMint {
    fn hash(&self) -> TxHash {
        *self.0.tx_hash()
    }

    async fn wait(self) -> Result<TxHash, Error> {
        let receipt = self.0.get_receipt().await?;
        let hash = receipt.transaction_hash();
        if receipt.status() {
            Ok(hash)
        } else {
            Err(Error::Reverted(hash))
        }
    }
}

fn to_u64(value: U256) -> Result<u64, Error> {
    u64::try_from(value).map_err(|_| Error::Overflow(value.to_string()))
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, uint};

    use super::*;

    #[test]
    fn event_token_id_becomes_count() {
        let event = MyEpicNFT::NewEpicNFTMinted {
            sender: address!("00000000000000000000000000000000000a11ce"),
            tokenId: uint!(50_U256),
        };
        let event = MintEvent::try_from(event).expect("should convert");
        assert_eq!(event.token_id, 50);
    }

    #[test]
    fn oversized_token_id_is_rejected() {
        let event = MyEpicNFT::NewEpicNFTMinted {
            sender: Address::ZERO,
            tokenId: U256::MAX,
        };
        let err = MintEvent::try_from(event).expect_err("should overflow");
        assert!(matches!(err, Error::Overflow(_)));
    }
}
