//! Chain identification.
use std::fmt;

/// Chain id of the Rinkeby test network.
pub const RINKEBY_CHAIN_ID: u64 = 4;

/// Human readable name of a well-known Ethereum chain.
#[must_use]
pub fn network_name(chain_id: u64) -> Option<&'static str> {
    match chain_id {
        1 => Some("Mainnet"),
        3 => Some("Ropsten"),
        4 => Some("Rinkeby"),
        5 => Some("Goerli"),
        42 => Some("Kovan"),
        11_155_111 => Some("Sepolia"),
        _ => None,
    }
}

/// A chain id together with its display name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Network(pub u64);

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match network_name(self.0) {
            Some(name) => f.write_str(name),
            None => write!(f, "unknown network (chain id {})", self.0),
        }
    }
}

/// Outcome of comparing the wallet's chain against the required one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkCheck {
    /// The wallet is on the required chain.
    Supported,
    /// The wallet is somewhere else.
    Unsupported {
        /// The chain the client needs.
        required: Network,
        /// The chain the wallet reported.
        detected: Network,
    },
}

impl NetworkCheck {
    /// Compare `detected` against `required`.
    #[must_use]
    pub fn new(required: u64, detected: u64) -> Self {
        if required == detected {
            NetworkCheck::Supported
        } else {
            NetworkCheck::Unsupported {
                required: Network(required),
                detected: Network(detected),
            }
        }
    }
}
