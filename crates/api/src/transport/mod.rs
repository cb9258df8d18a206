// Path: crates/api/src/transport/mod.rs
//! The seam between the execution engine and the wire.
//!
//! The client drives retries, failover and receipt polling; a [`NodeTransport`]
//! only performs one request against one node and reports what happened. The
//! gRPC implementation lives in the client crate. Tests substitute a scripted
//! transport.

use async_trait::async_trait;
use hgsdk_types::config::NodeAddress;
use hgsdk_types::error::TransportError;
use hgsdk_types::proto;
use std::fmt;
use std::time::Duration;

/// A unary RPC exposed by network nodes, such as `ConsensusService/submitMessage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceMethod {
    /// The fully qualified service name, e.g. `proto.ConsensusService`.
    pub service: &'static str,
    /// The method name, e.g. `submitMessage`.
    pub method: &'static str,
}

impl ServiceMethod {
    /// `CryptoService/createAccount`.
    pub const CREATE_ACCOUNT: Self = Self::new("proto.CryptoService", "createAccount");
    /// `CryptoService/cryptoTransfer`.
    pub const CRYPTO_TRANSFER: Self = Self::new("proto.CryptoService", "cryptoTransfer");
    /// `CryptoService/getTransactionReceipts`.
    pub const GET_TRANSACTION_RECEIPTS: Self =
        Self::new("proto.CryptoService", "getTransactionReceipts");
    /// `FileService/createFile`.
    pub const CREATE_FILE: Self = Self::new("proto.FileService", "createFile");
    /// `FileService/appendContent`.
    pub const APPEND_CONTENT: Self = Self::new("proto.FileService", "appendContent");
    /// `ConsensusService/createTopic`.
    pub const CREATE_TOPIC: Self = Self::new("proto.ConsensusService", "createTopic");
    /// `ConsensusService/submitMessage`.
    pub const SUBMIT_MESSAGE: Self = Self::new("proto.ConsensusService", "submitMessage");

    /// Creates a method descriptor.
    pub const fn new(service: &'static str, method: &'static str) -> Self {
        Self { service, method }
    }

    /// The HTTP/2 path of the method, e.g. `/proto.CryptoService/cryptoTransfer`.
    pub fn path(&self) -> String {
        format!("/{}/{}", self.service, self.method)
    }
}

impl fmt::Display for ServiceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.service, self.method)
    }
}

/// Performs single requests against single nodes.
///
/// Implementations map their failures onto [`TransportError`]: unreachable
/// nodes and expired deadlines are transient, malformed requests are not. A
/// precheck status inside a successfully delivered response is *not* a
/// transport error; the caller classifies it.
#[async_trait]
pub trait NodeTransport: Send + Sync {
    /// Sends a signed transaction and returns the node's precheck answer.
    async fn submit(
        &self,
        node: &NodeAddress,
        method: ServiceMethod,
        transaction: proto::Transaction,
        timeout: Duration,
    ) -> Result<proto::TransactionResponse, TransportError>;

    /// Sends a query and returns the node's response.
    async fn query(
        &self,
        node: &NodeAddress,
        method: ServiceMethod,
        query: proto::Query,
        timeout: Duration,
    ) -> Result<proto::Response, TransportError>;
}

#[async_trait]
impl<T: NodeTransport + ?Sized> NodeTransport for std::sync::Arc<T> {
    async fn submit(
        &self,
        node: &NodeAddress,
        method: ServiceMethod,
        transaction: proto::Transaction,
        timeout: Duration,
    ) -> Result<proto::TransactionResponse, TransportError> {
        (**self).submit(node, method, transaction, timeout).await
    }

    async fn query(
        &self,
        node: &NodeAddress,
        method: ServiceMethod,
        query: proto::Query,
        timeout: Duration,
    ) -> Result<proto::Response, TransportError> {
        (**self).query(node, method, query, timeout).await
    }
}
