/*!
# Epic Mint Client

A client for the `MyEpicNFT` collection. It connects a wallet, shows how many
tokens have been minted out of [`config::TOTAL_MINT_COUNT`], and asks the
contract to mint a new one.

All the interesting logic lives on-chain. This crate only sequences calls
against two collaborators:

- a [`WalletProvider`], which hands out accounts, reports the chain it is
  connected to, and signs transactions;
- a [`MintContract`], which reports the minted count, accepts mint
  transactions, and emits `NewEpicNFTMinted` events.

[`RpcWallet`] and [`RpcMintContract`] implement both on top of `alloy`.

```ignore
use epic_mint_client::{render, Config, MintClient, RpcWallet};

let config = Config::from_env()?;
let wallet = RpcWallet::from_config(&config);
let client = MintClient::new(wallet, config.clone(), notices);

client.init().await;
client.connect_wallet().await?;
client.mint().await?;

println!("{}", render(&client.session(), &config));
```
*/

#![allow(clippy::module_name_repetitions)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod network;
pub mod notice;
pub mod render;
pub mod session;
pub mod wallet;

#[cfg(test)]
pub(crate) mod test_utils;

pub use client::{MintClient, Subscription};
pub use config::Config;
pub use contract::{MintContract, MintEvent, PendingMint, RpcMintContract};
pub use error::Error;
pub use notice::{Notice, NoticeSink};
pub use render::{render, Action, View};
pub use session::{MintMode, Session};
pub use wallet::{RpcWallet, WalletProvider};
