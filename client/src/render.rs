//! Mapping from [`Session`] to what the user sees.
use std::fmt;

use crate::{
    config::{twitter_link, MY_TWITTER_HANDLE, OPENSEA_LINK, TWITTER_HANDLE},
    Config, Session,
};

/// The primary action offered to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// "Connect to Wallet".
    ConnectWallet,
    /// "Mint NFT".
    Mint,
    /// "Max minted". Triggering it is a no-op apart from a notice.
    MaxMinted,
}

impl Action {
    /// Button label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Action::ConnectWallet => "Connect to Wallet",
            Action::Mint => "Mint NFT",
            Action::MaxMinted => "Max minted",
        }
    }
}

/// A rendered page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct View {
    /// Connect or mint button.
    pub action: Action,
    /// Whether the in-progress indicator is shown.
    pub loading: bool,
    /// Minted count.
    pub minted: u64,
    /// Supply cap.
    pub cap: u64,
    /// Link to the collection.
    pub collection_link: &'static str,
}

/// Render `session`. Pure: the same session always gives the same view.
#[must_use]
pub fn render(session: &Session, config: &Config) -> View {
    let cap = config.total_mint_count;
    let action = if !session.is_connected() {
        Action::ConnectWallet
    } else if session.is_sold_out(cap) {
        Action::MaxMinted
    } else {
        Action::Mint
    };

    View {
        action,
        loading: session.is_minting,
        minted: session.minted_count,
        cap,
        collection_link: OPENSEA_LINK,
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "My NFT Collection")?;
        writeln!(f, "Each unique. Each beautiful. Discover your NFT today.")?;
        writeln!(f)?;
        writeln!(f, "[ {} ]", self.action.label())?;
        writeln!(f, "{}/{} minted so far", self.minted, self.cap)?;
        if self.loading {
            writeln!(f, "Loading ...")?;
        }
        writeln!(f, "View Collection on OpenSea: {}", self.collection_link)?;
        writeln!(f)?;
        write!(
            f,
            "built on @{TWITTER_HANDLE} ({}) by @{MY_TWITTER_HANDLE} ({})",
            twitter_link(TWITTER_HANDLE),
            twitter_link(MY_TWITTER_HANDLE),
        )
    }
}
