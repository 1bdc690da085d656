//! Per-session UI state.
use alloy::primitives::Address;

/// Everything the client knows about the current session.
///
/// Nothing here is persisted. A new process starts from
/// [`Session::default`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    /// The wallet account in use, if any.
    pub connected_account: Option<Address>,
    /// Minted count as last observed from the contract.
    pub minted_count: u64,
    /// Set between a mint submission and its event or failure.
    pub is_minting: bool,
}

/// Effective mode of the mint button.
///
/// ```text
/// Disconnected -> Idle -> Minting -> Idle
///                 Idle -> MaxReached
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MintMode {
    /// No account connected.
    Disconnected,
    /// Connected and able to mint.
    Idle,
    /// A mint transaction is in flight.
    Minting,
    /// The supply cap has been reached.
    MaxReached,
}

impl Session {
    /// Whether an account is connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected_account.is_some()
    }

    /// Whether the last observed count has reached `cap`.
    #[must_use]
    pub fn is_sold_out(&self, cap: u64) -> bool {
        self.minted_count >= cap
    }

    /// Current [`MintMode`] for a supply cap of `cap`.
    #[must_use]
    pub fn mode(&self, cap: u64) -> MintMode {
        if !self.is_connected() {
            MintMode::Disconnected
        } else if self.is_sold_out(cap) {
            MintMode::MaxReached
        } else if self.is_minting {
            MintMode::Minting
        } else {
            MintMode::Idle
        }
    }
}
