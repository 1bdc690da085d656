//! Blocking messages shown to the user.
use std::fmt;

use crate::network::Network;

/// A message the user has to acknowledge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// No wallet provider could be found.
    WalletAbsent,
    /// The wallet is connected to a chain the client does not support.
    WrongNetwork {
        /// The chain the client needs.
        required: Network,
        /// The chain the wallet reported.
        detected: Network,
    },
    /// A mint was requested after the supply cap was reached.
    MaxMinted {
        /// Last observed minted count.
        count: u64,
        /// Supply cap.
        cap: u64,
    },
    /// The contract reported a freshly minted token.
    Minted {
        /// Id of the new token.
        token_id: u64,
        /// Where the token can be viewed.
        link: String,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::WalletAbsent => f.write_str("Get MetaMask!"),
            Notice::WrongNetwork { required, detected } => write!(
                f,
                "Currently the only Ethereum Network supported is {required}. \
                 Please connect to {required} and retry. \
                 You're currently connected to: {detected}"
            ),
            Notice::MaxMinted { count, cap } => {
                write!(f, "Max number of NFTs are minted!{count}/{cap}")
            }
            Notice::Minted { link, .. } => write!(
                f,
                "Hey there! We've minted your NFT and sent it to your wallet. \
                 It may be blank right now. It can take a max of 10 min to \
                 show up on OpenSea. Here's the link: {link}"
            ),
        }
    }
}

/// Where notices go. The page version of this is `alert`.
pub trait NoticeSink: Send + Sync + 'static {
    /// Show `notice` to the user.
    fn notify(&self, notice: Notice);
}

/// A sink that only writes notices to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotices;

impl NoticeSink for LogNotices {
    fn notify(&self, notice: Notice) {
        tracing::warn!(%notice, "notice");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_network_names_both_chains() {
        let notice = Notice::WrongNetwork {
            required: Network(4),
            detected: Network(1),
        };
        let text = notice.to_string();
        assert!(text.contains("supported is Rinkeby"));
        assert!(text.contains("currently connected to: Mainnet"));
    }

    #[test]
    fn max_minted_reports_count_and_cap() {
        let notice = Notice::MaxMinted { count: 50, cap: 50 };
        assert_eq!(notice.to_string(), "Max number of NFTs are minted!50/50");
    }
}
