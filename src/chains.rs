//! Static registry of known EVM networks, used to label connection state.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainInfo {
    pub chain_id: u64,
    pub name: &'static str,
    pub currency: &'static str,
    pub explorer: &'static str,
}

const KNOWN_CHAINS: &[ChainInfo] = &[
    ChainInfo {
        chain_id: 1,
        name: "Ethereum Mainnet",
        currency: "ETH",
        explorer: "https://etherscan.io",
    },
    ChainInfo {
        chain_id: 11155111,
        name: "Sepolia",
        currency: "ETH",
        explorer: "https://sepolia.etherscan.io",
    },
    ChainInfo {
        chain_id: 137,
        name: "Polygon",
        currency: "POL",
        explorer: "https://polygonscan.com",
    },
    ChainInfo {
        chain_id: 8453,
        name: "Base",
        currency: "ETH",
        explorer: "https://basescan.org",
    },
    ChainInfo {
        chain_id: 42161,
        name: "Arbitrum One",
        currency: "ETH",
        explorer: "https://arbiscan.io",
    },
    ChainInfo {
        chain_id: 10,
        name: "OP Mainnet",
        currency: "ETH",
        explorer: "https://optimistic.etherscan.io",
    },
];

pub fn chain_info(chain_id: u64) -> Option<&'static ChainInfo> {
    KNOWN_CHAINS.iter().find(|c| c.chain_id == chain_id)
}

/// Human label for a chain id; unknown networks keep the raw id visible.
pub fn chain_label(chain_id: u64) -> String {
    match chain_info(chain_id) {
        Some(info) => info.name.to_string(),
        None => format!("chain #{}", chain_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mainnet_is_registered() {
        let info = chain_info(1).expect("mainnet entry");
        assert_eq!(info.name, "Ethereum Mainnet");
        assert_eq!(info.currency, "ETH");
    }

    #[test]
    fn unknown_chain_falls_back_to_id() {
        assert!(chain_info(999_999).is_none());
        assert_eq!(chain_label(999_999), "chain #999999");
    }
}
