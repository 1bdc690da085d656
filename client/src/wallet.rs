//! Wallet providers.
use std::{
    future::Future,
    sync::atomic::{AtomicBool, Ordering},
};

use alloy::{
    network::EthereumWallet,
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};

use crate::{contract::MintContract, Config, Error, RpcMintContract};

/// The subset of an EIP-1193 wallet the client relies on.
pub trait WalletProvider: Send + Sync + 'static {
    /// Contract binding produced by [`WalletProvider::connect`].
    type Contract: MintContract;

    /// Accounts the wallet has already authorized for this client
    /// (`eth_accounts`). Never prompts the user.
    ///
    /// # Errors
    ///
    /// May fail if the wallet cannot be reached.
    fn accounts(
        &self,
    ) -> impl Future<Output = Result<Vec<Address>, Error>> + Send;

    /// Ask the user to authorize accounts (`eth_requestAccounts`).
    ///
    /// # Errors
    ///
    /// May fail if the user rejects the request.
    fn request_accounts(
        &self,
    ) -> impl Future<Output = Result<Vec<Address>, Error>> + Send;

    /// Chain the wallet is connected to.
    ///
    /// # Errors
    ///
    /// May fail if the wallet cannot be reached.
    fn chain_id(&self) -> impl Future<Output = Result<u64, Error>> + Send;

    /// Get a signer for `account` and bind the contract at `contract` to it.
    ///
    /// # Errors
    ///
    /// May fail if the wallet has no signer for `account`.
    fn connect(
        &self,
        account: Address,
        contract: Address,
    ) -> impl Future<Output = Result<Self::Contract, Error>> + Send;
}

/// A wallet holding a single local key and talking JSON-RPC over HTTP.
pub struct RpcWallet {
    provider: DynProvider,
    address: Address,
    authorized: AtomicBool,
}

impl RpcWallet {
    /// Create a wallet for `signer` connected to `rpc_url`.
    ///
    /// `authorized` tells whether the user granted this client access in an
    /// earlier session.
    #[must_use]
    pub fn new(
        rpc_url: Url,
        signer: PrivateKeySigner,
        authorized: bool,
    ) -> Self {
        let address = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(rpc_url)
            .erased();

        Self { provider, address, authorized: AtomicBool::new(authorized) }
    }

    /// Build the wallet described by `config`, if there is one.
    #[must_use]
    pub fn from_config(config: &Config) -> Option<Self> {
        let rpc_url = config.rpc_url.clone()?;
        let signer = config.signer.clone()?;
        Some(Self::new(rpc_url, signer, config.wallet_authorized))
    }

    /// Address of the wallet's key.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    fn is_authorized(&self) -> bool {
        self.authorized.load(Ordering::SeqCst)
    }
}

impl WalletProvider for RpcWallet {
    type Contract = RpcMintContract;

    async fn accounts(&self) -> Result<Vec<Address>, Error> {
        if self.is_authorized() {
            Ok(vec![self.address])
        } else {
            Ok(vec![])
        }
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, Error> {
        // Running the client with a configured key is the user's consent.
        self.authorized.store(true, Ordering::SeqCst);
        Ok(vec![self.address])
    }

    async fn chain_id(&self) -> Result<u64, Error> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn connect(
        &self,
        account: Address,
        contract: Address,
    ) -> Result<RpcMintContract, Error> {
        if account != self.address || !self.is_authorized() {
            return Err(Error::AuthorizationRejected(format!(
                "no authorized signer for {account}"
            )));
        }
        Ok(RpcMintContract::new(contract, self.provider.clone()))
    }
}
