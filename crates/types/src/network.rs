//! Supported chains and environments.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// A chain/environment that the hosted provider serves.
///
/// The slug (e.g., `eth-sepolia`) is used both as the provider subdomain and
/// as the name accepted on the command line and in config files.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Network {
    #[default]
    EthMainnet,
    EthSepolia,
    EthHolesky,
    OptMainnet,
    OptSepolia,
    ArbMainnet,
    ArbSepolia,
    PolygonMainnet,
    PolygonAmoy,
    BaseMainnet,
    BaseSepolia,
}

impl Network {
    pub const ALL: [Network; 11] = [
        Network::EthMainnet,
        Network::EthSepolia,
        Network::EthHolesky,
        Network::OptMainnet,
        Network::OptSepolia,
        Network::ArbMainnet,
        Network::ArbSepolia,
        Network::PolygonMainnet,
        Network::PolygonAmoy,
        Network::BaseMainnet,
        Network::BaseSepolia,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Network::EthMainnet => "eth-mainnet",
            Network::EthSepolia => "eth-sepolia",
            Network::EthHolesky => "eth-holesky",
            Network::OptMainnet => "opt-mainnet",
            Network::OptSepolia => "opt-sepolia",
            Network::ArbMainnet => "arb-mainnet",
            Network::ArbSepolia => "arb-sepolia",
            Network::PolygonMainnet => "polygon-mainnet",
            Network::PolygonAmoy => "polygon-amoy",
            Network::BaseMainnet => "base-mainnet",
            Network::BaseSepolia => "base-sepolia",
        }
    }

    /// EIP-155 chain id.
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::EthMainnet => 1,
            Network::EthSepolia => 11155111,
            Network::EthHolesky => 17000,
            Network::OptMainnet => 10,
            Network::OptSepolia => 11155420,
            Network::ArbMainnet => 42161,
            Network::ArbSepolia => 421614,
            Network::PolygonMainnet => 137,
            Network::PolygonAmoy => 80002,
            Network::BaseMainnet => 8453,
            Network::BaseSepolia => 84532,
        }
    }

    pub fn is_testnet(&self) -> bool {
        !self.slug().ends_with("-mainnet")
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Accepts the slug in any case, with `_` in place of `-` (`ETH_SEPOLIA`).
impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase().replace('_', "-");
        Network::ALL
            .into_iter()
            .find(|network| network.slug() == normalised)
            .ok_or_else(|| ConfigError::UnknownNetwork(s.to_string()))
    }
}

impl TryFrom<String> for Network {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Network> for String {
    fn from(network: Network) -> Self {
        network.slug().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip_all() {
        for network in Network::ALL {
            assert_eq!(network.slug().parse::<Network>().unwrap(), network);
        }
    }

    #[test]
    fn test_sdk_constant_spelling() {
        assert_eq!("ETH_SEPOLIA".parse::<Network>().unwrap(), Network::EthSepolia);
        assert_eq!(" Base-Mainnet ".parse::<Network>().unwrap(), Network::BaseMainnet);
    }

    #[test]
    fn test_unknown_network_rejected() {
        let err = "test-network-z".parse::<Network>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownNetwork(name) if name == "test-network-z"));
    }

    #[test]
    fn test_testnet_and_chain_id() {
        assert!(Network::EthSepolia.is_testnet());
        assert!(!Network::EthMainnet.is_testnet());
        assert_eq!(Network::EthSepolia.chain_id(), 11155111);
        assert_eq!(Network::default(), Network::EthMainnet);
    }

    #[test]
    fn test_serde_uses_slug() {
        let json = serde_json::to_string(&Network::ArbSepolia).unwrap();
        assert_eq!(json, "\"arb-sepolia\"");
        let parsed: Network = serde_json::from_str("\"POLYGON_AMOY\"").unwrap();
        assert_eq!(parsed, Network::PolygonAmoy);
        assert!(serde_json::from_str::<Network>("\"moon-mainnet\"").is_err());
    }
}
