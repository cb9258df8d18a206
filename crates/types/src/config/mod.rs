// Path: crates/types/src/config/mod.rs

//! Client configuration.
//!
//! Loaded from TOML. Every tunable has a default, so an empty file plus a network
//! name is a valid configuration.

use crate::app::AccountId;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Node address books and the well-known named networks.
pub mod network;
pub use network::*;

/// Shortest valid duration a transaction may declare.
pub const MIN_VALID_DURATION_SECS: u64 = 1;
/// Longest valid duration a transaction may declare.
pub const MAX_VALID_DURATION_SECS: u64 = 180;

/// Which nodes the client talks to.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum NetworkConfig {
    /// A built-in network such as `testnet`.
    Named(String),
    /// An explicit list of nodes.
    Nodes(Vec<NodeAddress>),
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig::Named("testnet".to_string())
    }
}

impl NetworkConfig {
    /// Resolves the configuration to a concrete node list.
    pub fn resolve(&self) -> Result<Vec<NodeAddress>, ConfigError> {
        let nodes = match self {
            NetworkConfig::Named(name) => {
                named_network(name).ok_or_else(|| ConfigError::UnknownNetwork(name.clone()))?
            }
            NetworkConfig::Nodes(nodes) => nodes.clone(),
        };
        if nodes.is_empty() {
            return Err(ConfigError::Invalid("network has no nodes".into()));
        }
        Ok(nodes)
    }
}

/// The account paying for transactions and the key that signs for it.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OperatorConfig {
    /// The paying account.
    pub account_id: AccountId,
    /// Ed25519 private key as raw or DER hex.
    pub private_key: String,
}

impl fmt::Debug for OperatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorConfig")
            .field("account_id", &self.account_id)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Receipt polling budget.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ReceiptConfig {
    /// Receipt queries made before giving up.
    #[serde(default = "default_receipt_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the second query.
    #[serde(default = "default_receipt_min_backoff_ms")]
    pub min_backoff_ms: u64,
    /// Upper bound on the delay between queries.
    #[serde(default = "default_receipt_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

fn default_receipt_max_attempts() -> u32 {
    20
}
fn default_receipt_min_backoff_ms() -> u64 {
    250
}
fn default_receipt_max_backoff_ms() -> u64 {
    4_000
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_receipt_max_attempts(),
            min_backoff_ms: default_receipt_min_backoff_ms(),
            max_backoff_ms: default_receipt_max_backoff_ms(),
        }
    }
}

/// Configuration for a `Client`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// The nodes to talk to.
    #[serde(default)]
    pub network: NetworkConfig,
    /// The default payer and signer.
    #[serde(default)]
    pub operator: Option<OperatorConfig>,
    /// Submission attempts across all nodes before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Backoff before the first retry.
    #[serde(default = "default_min_backoff_ms")]
    pub min_backoff_ms: u64,
    /// Upper bound on the backoff between retries.
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// Consecutive failures after which a node is moved behind healthy ones.
    #[serde(default = "default_node_failure_threshold")]
    pub node_failure_threshold: u32,
    /// How long a failing node stays deprioritized.
    #[serde(default = "default_node_cooldown_ms")]
    pub node_cooldown_ms: u64,
    /// Timeout for a single request to a single node.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Budget for one operation end to end: submission retries and receipt
    /// polling together.
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,
    /// Receipt polling budget.
    #[serde(default)]
    pub receipt: ReceiptConfig,
    /// Default maximum fee, in tinybars.
    #[serde(default = "default_max_transaction_fee")]
    pub max_transaction_fee: u64,
    /// Default valid duration of a transaction.
    #[serde(default = "default_transaction_valid_duration_secs")]
    pub transaction_valid_duration_secs: u64,
    /// How many nodes a frozen transaction is prepared for.
    #[serde(default = "default_max_nodes_per_transaction")]
    pub max_nodes_per_transaction: usize,
}

fn default_max_attempts() -> u32 {
    10
}
fn default_min_backoff_ms() -> u64 {
    250
}
fn default_max_backoff_ms() -> u64 {
    8_000
}
fn default_node_failure_threshold() -> u32 {
    2
}
fn default_node_cooldown_ms() -> u64 {
    30_000
}
fn default_request_timeout_ms() -> u64 {
    10_000
}
fn default_operation_timeout_ms() -> u64 {
    120_000
}
fn default_max_transaction_fee() -> u64 {
    200_000_000
}
fn default_transaction_valid_duration_secs() -> u64 {
    120
}
fn default_max_nodes_per_transaction() -> usize {
    3
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            operator: None,
            max_attempts: default_max_attempts(),
            min_backoff_ms: default_min_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            node_failure_threshold: default_node_failure_threshold(),
            node_cooldown_ms: default_node_cooldown_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            operation_timeout_ms: default_operation_timeout_ms(),
            receipt: ReceiptConfig::default(),
            max_transaction_fee: default_max_transaction_fee(),
            transaction_valid_duration_secs: default_transaction_valid_duration_secs(),
            max_nodes_per_transaction: default_max_nodes_per_transaction(),
        }
    }
}

impl ClientConfig {
    /// A default configuration for the given node list.
    pub fn for_nodes(nodes: Vec<NodeAddress>) -> Self {
        Self {
            network: NetworkConfig::Nodes(nodes),
            ..Self::default()
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Checks cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.network.resolve()?;
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid("max_attempts must be at least 1".into()));
        }
        if self.min_backoff_ms > self.max_backoff_ms {
            return Err(ConfigError::Invalid(format!(
                "min_backoff_ms ({}) exceeds max_backoff_ms ({})",
                self.min_backoff_ms, self.max_backoff_ms
            )));
        }
        if self.receipt.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "receipt.max_attempts must be at least 1".into(),
            ));
        }
        if self.receipt.min_backoff_ms > self.receipt.max_backoff_ms {
            return Err(ConfigError::Invalid(
                "receipt.min_backoff_ms exceeds receipt.max_backoff_ms".into(),
            ));
        }
        if self.node_failure_threshold == 0 {
            return Err(ConfigError::Invalid(
                "node_failure_threshold must be at least 1".into(),
            ));
        }
        if self.max_nodes_per_transaction == 0 {
            return Err(ConfigError::Invalid(
                "max_nodes_per_transaction must be at least 1".into(),
            ));
        }
        if !(MIN_VALID_DURATION_SECS..=MAX_VALID_DURATION_SECS)
            .contains(&self.transaction_valid_duration_secs)
        {
            return Err(ConfigError::Invalid(format!(
                "transaction_valid_duration_secs must be within {}..={}",
                MIN_VALID_DURATION_SECS, MAX_VALID_DURATION_SECS
            )));
        }
        if self.request_timeout_ms == 0 || self.operation_timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeouts must be non-zero".into()));
        }
        Ok(())
    }

    /// Backoff before the first retry.
    pub fn min_backoff(&self) -> Duration {
        Duration::from_millis(self.min_backoff_ms)
    }

    /// Upper bound on the retry backoff.
    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }

    /// How long a failing node stays deprioritized.
    pub fn node_cooldown(&self) -> Duration {
        Duration::from_millis(self.node_cooldown_ms)
    }

    /// Timeout for a single request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// End-to-end budget for one operation.
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }

    /// Default valid duration of a transaction.
    pub fn transaction_valid_duration(&self) -> Duration {
        Duration::from_secs(self.transaction_valid_duration_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.network, NetworkConfig::Named("testnet".into()));
        assert_eq!(config.transaction_valid_duration_secs, 120);
    }

    #[test]
    fn test_explicit_nodes_and_operator() {
        let toml = r#"
            max_attempts = 4
            node_failure_threshold = 1

            [operator]
            account_id = "0.0.1001"
            private_key = "302e020100300506032b657004220420aa"

            [receipt]
            max_attempts = 5

            [[network]]
            account_id = "0.0.3"
            address = "127.0.0.1:50211"

            [[network]]
            account_id = "0.0.4"
            address = "127.0.0.1:50212"
        "#;
        let config = ClientConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.max_attempts, 4);
        assert_eq!(config.receipt.max_attempts, 5);
        assert_eq!(config.receipt.min_backoff_ms, 250);
        let nodes = config.network.resolve().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].account_id, AccountId::from_num(4));
        let operator = config.operator.unwrap();
        assert_eq!(operator.account_id, AccountId::from_num(1001));
        assert!(!format!("{:?}", operator).contains("aa\""));
    }

    #[test]
    fn test_validation_failures() {
        assert!(matches!(
            ClientConfig::from_toml_str("network = \"devnet\""),
            Err(ConfigError::UnknownNetwork(_))
        ));
        assert!(matches!(
            ClientConfig::from_toml_str("max_attempts = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ClientConfig::from_toml_str("transaction_valid_duration_secs = 181"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ClientConfig::from_toml_str("max_attempts = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
