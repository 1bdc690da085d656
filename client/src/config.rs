//! Compiled-in constants and runtime configuration.
use alloy::{
    primitives::{address, Address, TxHash},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};

use crate::{network::RINKEBY_CHAIN_ID, Error};

/// Address of the `MyEpicNFT` contract on Rinkeby.
pub const CONTRACT_ADDRESS: Address =
    address!("6570bb9345edf9ce8930fee6b854ef3c26a1c0ad");

/// Maximum number of tokens the contract will ever mint.
pub const TOTAL_MINT_COUNT: u64 = 50;

/// OpenSea listing of the whole collection.
pub const OPENSEA_LINK: &str =
    "https://testnets.opensea.io/collection/squarenft-zzsucrdtnz";

/// Twitter handle of the project the collection was built on.
pub const TWITTER_HANDLE: &str = "_buildspace";

/// Twitter handle of the collection's author.
pub const MY_TWITTER_HANDLE: &str = "thenkkurt";

const TWITTER: &str = "https://twitter.com";
const OPENSEA_ASSETS: &str = "https://testnets.opensea.io/assets";
const ETHERSCAN_TX: &str = "https://rinkeby.etherscan.io/tx";

pub(crate) const RPC_URL_ENV_VAR_NAME: &str = "RPC_URL";
pub(crate) const PRIVATE_KEY_ENV_VAR_NAME: &str = "PRIVATE_KEY";
pub(crate) const WALLET_AUTHORIZED_ENV_VAR_NAME: &str = "WALLET_AUTHORIZED";
pub(crate) const CONTRACT_ADDRESS_ENV_VAR_NAME: &str = "MINT_CONTRACT_ADDRESS";

/// Runtime configuration of a [`crate::MintClient`].
///
/// A missing `rpc_url` or `signer` means there is no wallet provider at all,
/// the same way a browser without an injected `ethereum` object has none.
#[derive(Clone, Debug)]
pub struct Config {
    /// JSON-RPC endpoint the wallet talks to.
    pub rpc_url: Option<Url>,
    /// Key held by the wallet.
    pub signer: Option<PrivateKeySigner>,
    /// Whether the wallet already authorized this client in a previous
    /// session, so `eth_accounts` reports the account without a prompt.
    pub wallet_authorized: bool,
    /// Address of the mint contract.
    pub contract_address: Address,
    /// Supply cap.
    pub total_mint_count: u64,
    /// The only chain the client supports.
    pub required_chain_id: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: None,
            signer: None,
            wallet_authorized: false,
            contract_address: CONTRACT_ADDRESS,
            total_mint_count: TOTAL_MINT_COUNT,
            required_chain_id: RINKEBY_CHAIN_ID,
        }
    }
}

impl Config {
    /// Load the configuration from the environment, reading a `.env` file
    /// first if there is one.
    ///
    /// # Errors
    ///
    /// May fail if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, Error> {
        // A missing `.env` file is fine.
        let _ = dotenv::dotenv();

        let rpc_url = env(RPC_URL_ENV_VAR_NAME)
            .map(|url| url.parse::<Url>())
            .transpose()
            .map_err(|e| Error::config(RPC_URL_ENV_VAR_NAME, e))?;

        let signer = env(PRIVATE_KEY_ENV_VAR_NAME)
            .map(|pk| pk.parse::<PrivateKeySigner>())
            .transpose()
            .map_err(|e| Error::config(PRIVATE_KEY_ENV_VAR_NAME, e))?;

        let wallet_authorized = env(WALLET_AUTHORIZED_ENV_VAR_NAME)
            .map(|flag| flag.parse::<bool>())
            .transpose()
            .map_err(|e| Error::config(WALLET_AUTHORIZED_ENV_VAR_NAME, e))?
            .unwrap_or_default();

        let contract_address = env(CONTRACT_ADDRESS_ENV_VAR_NAME)
            .map(|addr| addr.parse::<Address>())
            .transpose()
            .map_err(|e| Error::config(CONTRACT_ADDRESS_ENV_VAR_NAME, e))?
            .unwrap_or(CONTRACT_ADDRESS);

        Ok(Self {
            rpc_url,
            signer,
            wallet_authorized,
            contract_address,
            ..Self::default()
        })
    }

    /// OpenSea page of a single minted token.
    #[must_use]
    pub fn asset_link(&self, token_id: u64) -> String {
        format!("{OPENSEA_ASSETS}/{}/{token_id}", self.contract_address)
    }

    /// Block explorer page of a mint transaction.
    #[must_use]
    pub fn tx_link(hash: &TxHash) -> String {
        format!("{ETHERSCAN_TX}/{hash}")
    }
}

/// Profile page of a Twitter `handle`.
#[must_use]
pub fn twitter_link(handle: &str) -> String {
    format!("{TWITTER}/{handle}")
}

/// Load the `name` environment variable, treating empty values as unset.
fn env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
