//! Networks prompts can be saved to.
//!
//! Presets are looked up by name from the config, and a wallet's chain id is
//! checked against them before saving.

use serde::{Deserialize, Serialize};

/// Network a wallet must be connected to before prompts can be saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// Config name: "mainnet" or "testnet".
    pub name: String,
    /// Human-readable chain name.
    pub display_name: String,
    /// EVM chain id the wallet reports.
    pub chain_id: u64,
    /// Symbol used when quoting storage costs.
    pub currency: String,
    pub rpc_url: String,
    pub explorer_url: String,
    pub testnet: bool,
}

impl Network {
    /// Irys mainnet.
    pub fn mainnet() -> Self {
        Self {
            name: "mainnet".into(),
            display_name: "Irys".into(),
            chain_id: 1270,
            currency: "IRYS".into(),
            rpc_url: "https://mainnet-rpc.irys.xyz/v1/execution-rpc".into(),
            explorer_url: "https://mainnet-explorer.irys.xyz".into(),
            testnet: false,
        }
    }

    /// Irys testnet.
    pub fn testnet() -> Self {
        Self {
            name: "testnet".into(),
            display_name: "Irys Testnet v1".into(),
            chain_id: 1270,
            currency: "IRYS".into(),
            rpc_url: "https://testnet-rpc.irys.xyz/v1/execution-rpc".into(),
            explorer_url: "https://testnet-explorer.irys.xyz".into(),
            testnet: true,
        }
    }

    /// Resolve a network by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mainnet" => Some(Self::mainnet()),
            "testnet" => Some(Self::testnet()),
            _ => None,
        }
    }

    /// Whether `chain_id` belongs to any supported network.
    pub fn is_supported_chain(chain_id: u64) -> bool {
        [Self::mainnet(), Self::testnet()]
            .iter()
            .any(|n| n.chain_id == chain_id)
    }

    /// Explorer link for a (simulated) transaction hash.
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{tx_hash}", self.explorer_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_valid_networks() {
        assert_eq!(Network::from_name("mainnet"), Some(Network::mainnet()));
        assert_eq!(Network::from_name("testnet"), Some(Network::testnet()));
    }

    #[test]
    fn test_from_name_invalid() {
        assert!(Network::from_name("devnet").is_none());
        assert!(Network::from_name("").is_none());
    }

    #[test]
    fn test_supported_chain() {
        assert!(Network::is_supported_chain(1270));
        assert!(!Network::is_supported_chain(1));
    }

    #[test]
    fn test_tx_url() {
        let url = Network::testnet().tx_url("0xabc");
        assert_eq!(url, "https://testnet-explorer.irys.xyz/tx/0xabc");
    }
}
