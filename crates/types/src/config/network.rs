// Path: crates/types/src/config/network.rs

//! Node address books.

use crate::app::AccountId;
use serde::{Deserialize, Serialize};

/// One network node: the account it is addressed by and where to reach it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NodeAddress {
    /// The node's account id, as written into transaction bodies.
    pub account_id: AccountId,
    /// `host:port` of the node's gRPC endpoint.
    pub address: String,
}

impl NodeAddress {
    /// Creates a node address.
    pub fn new(account_id: AccountId, address: impl Into<String>) -> Self {
        Self {
            account_id,
            address: address.into(),
        }
    }
}

/// The networks known by name.
pub const NAMED_NETWORKS: [&str; 4] = ["mainnet", "testnet", "previewnet", "local"];

const MAINNET_HOSTS: [&str; 4] = [
    "35.237.200.180:50211",
    "35.186.191.247:50211",
    "35.192.2.25:50211",
    "35.199.161.108:50211",
];

/// The built-in address book for a named network, or `None` if the name is
/// not known.
pub fn named_network(name: &str) -> Option<Vec<NodeAddress>> {
    let hosted = |domain: &str| {
        (0..4u64)
            .map(|i| NodeAddress::new(AccountId::from_num(3 + i), format!("{}.{}:50211", i, domain)))
            .collect()
    };
    match name.to_ascii_lowercase().as_str() {
        "mainnet" => Some(
            MAINNET_HOSTS
                .iter()
                .zip(3u64..)
                .map(|(host, num)| NodeAddress::new(AccountId::from_num(num), *host))
                .collect(),
        ),
        "testnet" => Some(hosted("testnet.hedera.com")),
        "previewnet" => Some(hosted("previewnet.hedera.com")),
        "local" => Some(vec![NodeAddress::new(
            AccountId::from_num(3),
            "127.0.0.1:50211",
        )]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_networks() {
        for name in NAMED_NETWORKS {
            let nodes = named_network(name).unwrap();
            assert!(!nodes.is_empty());
            assert_eq!(nodes[0].account_id, AccountId::from_num(3));
        }
        let testnet = named_network("TestNet").unwrap();
        assert_eq!(testnet[1].address, "1.testnet.hedera.com:50211");
        assert_eq!(testnet[3].account_id, AccountId::from_num(6));
        assert!(named_network("devnet").is_none());
    }
}
