//! Errors surfaced by the mint client.
use std::fmt::Display;

use thiserror::Error;

/// Everything that can stop a user action.
///
/// Each variant is terminal for the action that produced it. Nothing is
/// retried automatically, and a transient RPC failure looks the same as a
/// permanent rejection.
#[derive(Error, Debug)]
pub enum Error {
    /// There is no wallet provider to talk to.
    #[error("no wallet provider available")]
    WalletAbsent,

    /// The wallet refused to hand out an account.
    #[error("wallet authorization rejected: {0}")]
    AuthorizationRejected(String),

    /// A mint was requested before any account was connected.
    #[error("no wallet account connected")]
    NotConnected,

    /// Every token has already been minted.
    #[error("max number of NFTs are minted: {count}/{cap}")]
    SupplyCapReached {
        /// Last observed minted count.
        count: u64,
        /// Supply cap.
        cap: u64,
    },

    /// The node or the wallet failed to answer an RPC request.
    #[error(transparent)]
    Transport(#[from] alloy::transports::TransportError),

    /// A contract call or transaction failed.
    #[error(transparent)]
    Contract(#[from] alloy::contract::Error),

    /// Waiting for a pending transaction failed.
    #[error(transparent)]
    PendingTransaction(#[from] alloy::providers::PendingTransactionError),

    /// The transaction was mined but reverted.
    #[error("transaction {0} reverted")]
    Reverted(alloy::primitives::TxHash),

    /// A mint event could not be decoded.
    #[error("failed to decode mint event: {0}")]
    Event(#[from] alloy::sol_types::Error),

    /// A value returned by the contract does not fit the client's model.
    #[error("unexpected value from contract: {0}")]
    Overflow(String),

    /// An environment variable was set to something unusable.
    #[error("invalid `{name}`: {reason}")]
    Config {
        /// Variable name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl Error {
    pub(crate) fn config(name: &'static str, reason: impl Display) -> Self {
        Error::Config { name, reason: reason.to_string() }
    }
}
