// Path: crates/client/src/client.rs
//! The shared client handle.

use crate::clock::{Deadline, SystemClock};
use crate::grpc::GrpcTransport;
use crate::network::Network;
use arc_swap::ArcSwapOption;
use hgsdk_api::clock::Clock;
use hgsdk_api::crypto::SigningProvider;
use hgsdk_api::transport::NodeTransport;
use hgsdk_crypto::Ed25519PrivateKey;
use hgsdk_types::app::{AccountId, PublicKey};
use hgsdk_types::config::{ClientConfig, NodeAddress};
use hgsdk_types::error::{CryptoError, Error};
use std::fmt;
use std::sync::Arc;

/// The account paying for transactions by default, with its key.
#[derive(Clone)]
pub struct Operator {
    account_id: AccountId,
    key: Arc<Ed25519PrivateKey>,
}

impl Operator {
    pub fn new(account_id: AccountId, key: Ed25519PrivateKey) -> Self {
        Self {
            account_id,
            key: Arc::new(key),
        }
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn public_key(&self) -> PublicKey {
        self.key.to_public_key()
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("account_id", &self.account_id)
            .field("public_key", &self.public_key())
            .finish()
    }
}

impl SigningProvider for Operator {
    fn sign(&self, public_key: &PublicKey, message: &[u8]) -> Result<Option<Vec<u8>>, CryptoError> {
        SigningProvider::sign(&*self.key, public_key, message)
    }

    fn public_keys(&self) -> Vec<PublicKey> {
        vec![self.public_key()]
    }
}

struct ClientInner {
    config: ClientConfig,
    network: Network,
    transport: Arc<dyn NodeTransport>,
    clock: Arc<dyn Clock>,
    operator: ArcSwapOption<Operator>,
}

/// A handle to a configured network.
///
/// Cloning is cheap and every clone shares the node list, node health and
/// operator. Independent operations may run concurrently on clones of one
/// client; they share nothing else.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("nodes", &self.inner.network.len())
            .field("operator", &self.operator().map(|o| o.account_id()))
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Starts a builder from `config`.
    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder {
            config,
            transport: None,
            clock: None,
            operator: None,
        }
    }

    /// Builds a gRPC client from configuration, including the operator when
    /// one is configured.
    pub fn from_config(config: ClientConfig) -> Result<Self, Error> {
        Self::builder(config).build()
    }

    /// A gRPC client for an explicit node list with default settings.
    pub fn for_nodes(nodes: Vec<NodeAddress>) -> Result<Self, Error> {
        Self::from_config(ClientConfig::for_nodes(nodes))
    }

    /// A gRPC client for one of the built-in networks.
    pub fn for_name(name: &str) -> Result<Self, Error> {
        Self::from_config(ClientConfig {
            network: hgsdk_types::config::NetworkConfig::Named(name.to_string()),
            ..ClientConfig::default()
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn network(&self) -> &Network {
        &self.inner.network
    }

    pub fn transport(&self) -> &Arc<dyn NodeTransport> {
        &self.inner.transport
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.inner.clock
    }

    /// Replaces the operator. Operations already frozen keep the payer they
    /// were frozen with.
    pub fn set_operator(&self, account_id: AccountId, key: Ed25519PrivateKey) {
        tracing::info!(target: "client", operator = %account_id, "operator set");
        self.inner
            .operator
            .store(Some(Arc::new(Operator::new(account_id, key))));
    }

    pub fn operator(&self) -> Option<Arc<Operator>> {
        self.inner.operator.load_full()
    }

    /// Replaces the node list without disturbing submissions in flight.
    pub fn set_network(&self, nodes: Vec<NodeAddress>) {
        self.inner.network.set_nodes(nodes);
    }

    /// A fresh deadline using the configured operation timeout.
    pub fn deadline(&self) -> Deadline {
        Deadline::after(self.inner.config.operation_timeout())
    }
}

/// Assembles a [`Client`], allowing the transport and clock to be replaced.
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn NodeTransport>>,
    clock: Option<Arc<dyn Clock>>,
    operator: Option<Operator>,
}

impl ClientBuilder {
    /// Uses `transport` instead of gRPC.
    pub fn transport(mut self, transport: Arc<dyn NodeTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Uses `clock` instead of the system clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets the operator, overriding any operator in the configuration.
    pub fn operator(mut self, account_id: AccountId, key: Ed25519PrivateKey) -> Self {
        self.operator = Some(Operator::new(account_id, key));
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        self.config.validate()?;
        let network = Network::from_config(&self.config)?;

        let operator = match (self.operator, &self.config.operator) {
            (Some(op), _) => Some(op),
            (None, Some(cfg)) => {
                let key: Ed25519PrivateKey = cfg.private_key.parse()?;
                Some(Operator::new(cfg.account_id, key))
            }
            (None, None) => None,
        };

        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(GrpcTransport::new()));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));

        tracing::debug!(
            target: "client",
            nodes = network.len(),
            operator = ?operator.as_ref().map(Operator::account_id),
            "client built"
        );

        Ok(Client {
            inner: Arc::new(ClientInner {
                config: self.config,
                network,
                transport,
                clock,
                operator: ArcSwapOption::from(operator.map(Arc::new)),
            }),
        })
    }
}
