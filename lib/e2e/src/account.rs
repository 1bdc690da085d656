use std::str::FromStr;

use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    primitives::{uint, Address, TxHash, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::{TransactionReceipt, TransactionRequest},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use eyre::{Context, ContextCompat};
use once_cell::sync::Lazy;
use tokio::sync::{Mutex, MutexGuard};

const RPC_URL_ENV_VAR_NAME: &str = "RPC_URL";

/// First development account of a local `anvil` node.
const MASTER_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const DEFAULT_FUNDING_ETH: U256 = uint!(1_000_000_000_000_000_000_U256);

/// A freshly funded account on the node at `RPC_URL`.
#[derive(Clone)]
pub struct Account {
    /// The account's local private key wrapper.
    pub signer: PrivateKeySigner,
    url: Url,
    provider: DynProvider,
}

impl Account {
    /// Create a new account funded with [`DEFAULT_FUNDING_ETH`].
    ///
    /// # Errors
    ///
    /// May fail if `RPC_URL` is missing or funding the account fails.
    pub async fn new() -> eyre::Result<Self> {
        AccountFactory::create().await
    }

    /// Retrieve this account's address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The rpc endpoint this account's provider is connected to.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Chain id of the node.
    ///
    /// # Errors
    ///
    /// May fail if the node cannot be reached.
    pub async fn chain_id(&self) -> eyre::Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    /// Receipt of an already mined transaction.
    ///
    /// # Errors
    ///
    /// May fail if the node does not know the transaction.
    pub async fn receipt(
        &self,
        hash: TxHash,
    ) -> eyre::Result<TransactionReceipt> {
        self.provider
            .get_transaction_receipt(hash)
            .await?
            .with_context(|| format!("no receipt for {hash}"))
    }
}

/// A unit struct used as a synchronization mechanism in
/// [`AccountFactory::lock`].
struct AccountFactory;

impl AccountFactory {
    async fn lock() -> MutexGuard<'static, Self> {
        /// Accounts are funded from a single master wallet, so creation must
        /// be serialized or the master's nonce goes stale.
        static SYNC_ACCOUNT_FACTORY: Lazy<Mutex<AccountFactory>> =
            Lazy::new(|| Mutex::new(AccountFactory));

        SYNC_ACCOUNT_FACTORY.lock().await
    }

    async fn create() -> eyre::Result<Account> {
        let _lock = AccountFactory::lock().await;

        let url: Url = std::env::var(RPC_URL_ENV_VAR_NAME)
            .wrap_err("failed to load RPC_URL var from env")?
            .parse()
            .wrap_err("failed to parse RPC_URL string into a URL")?;

        let master = PrivateKeySigner::from_str(MASTER_PRIVATE_KEY)
            .wrap_err("failed to create master signer")?;
        let master_wallet = ProviderBuilder::new()
            .wallet(EthereumWallet::from(master.clone()))
            .connect_http(url.clone());

        let signer = PrivateKeySigner::random();
        let tx = TransactionRequest::default()
            .with_from(master.address())
            .with_to(signer.address())
            .with_value(DEFAULT_FUNDING_ETH);

        master_wallet
            .send_transaction(tx)
            .await?
            .watch()
            .await
            .wrap_err("account's wallet wasn't funded")?;

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer.clone()))
            .connect_http(url.clone())
            .erased();

        Ok(Account { signer, url, provider })
    }
}
