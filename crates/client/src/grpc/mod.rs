// Path: crates/client/src/grpc/mod.rs
//! [`NodeTransport`] over gRPC.
//!
//! Nodes expose plain unary methods, so no generated service stubs are needed:
//! each call goes through [`tonic::client::Grpc`] with a [`ProstCodec`] at the
//! method's path. One lazily connected channel is cached per node address.

use async_trait::async_trait;
use dashmap::DashMap;
use hgsdk_api::transport::{NodeTransport, ServiceMethod};
use hgsdk_types::app::AccountId;
use hgsdk_types::config::NodeAddress;
use hgsdk_types::error::TransportError;
use hgsdk_types::proto;
use std::time::Duration;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Distinguishes requests the node processed and refused from failures of the
/// infrastructure in between.
fn map_grpc_status(node: AccountId, status: tonic::Status) -> TransportError {
    match status.code() {
        tonic::Code::InvalidArgument
        | tonic::Code::FailedPrecondition
        | tonic::Code::Unimplemented
        | tonic::Code::Unauthenticated
        | tonic::Code::PermissionDenied
        | tonic::Code::OutOfRange => TransportError::InvalidRequest {
            node,
            reason: status.message().to_string(),
        },
        tonic::Code::DeadlineExceeded => TransportError::Timeout { node },
        // Unavailable, ResourceExhausted, Internal, Unknown, Aborted, ...
        _ => TransportError::Unavailable {
            node,
            reason: status.to_string(),
        },
    }
}

/// The production transport.
#[derive(Debug, Default)]
pub struct GrpcTransport {
    channels: DashMap<String, Channel>,
}

impl GrpcTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached channel for `node`, creating it on first use.
    ///
    /// `connect_lazy` defers dialing to the first request, so an unreachable
    /// node surfaces as `Unavailable` on the call and enters the retry loop.
    fn channel(&self, node: &NodeAddress) -> Result<Channel, TransportError> {
        if let Some(channel) = self.channels.get(&node.address) {
            return Ok(channel.clone());
        }
        let uri = if node.address.starts_with("http") {
            node.address.clone()
        } else {
            format!("http://{}", node.address)
        };
        let channel = Endpoint::from_shared(uri)
            .map_err(|e| TransportError::InvalidRequest {
                node: node.account_id,
                reason: format!("bad node address '{}': {}", node.address, e),
            })?
            .connect_timeout(CONNECT_TIMEOUT)
            .connect_lazy();
        log::debug!("opened lazy channel to node {} at {}", node.account_id, node.address);
        Ok(self
            .channels
            .entry(node.address.clone())
            .or_insert(channel)
            .clone())
    }

    async fn unary<Req, Resp>(
        &self,
        node: &NodeAddress,
        method: ServiceMethod,
        message: Req,
        timeout: Duration,
    ) -> Result<Resp, TransportError>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let id = node.account_id;
        let channel = self.channel(node)?;
        let path = PathAndQuery::try_from(method.path()).map_err(|e| {
            TransportError::InvalidRequest {
                node: id,
                reason: format!("bad method path '{}': {}", method, e),
            }
        })?;

        let mut grpc = tonic::client::Grpc::new(channel);
        grpc.ready().await.map_err(|e| TransportError::Unavailable {
            node: id,
            reason: e.to_string(),
        })?;

        let mut request = tonic::Request::new(message);
        request.set_timeout(timeout);
        let codec: ProstCodec<Req, Resp> = ProstCodec::default();
        grpc.unary(request, path, codec)
            .await
            .map(tonic::Response::into_inner)
            .map_err(|status| map_grpc_status(id, status))
    }
}

#[async_trait]
impl NodeTransport for GrpcTransport {
    async fn submit(
        &self,
        node: &NodeAddress,
        method: ServiceMethod,
        transaction: proto::Transaction,
        timeout: Duration,
    ) -> Result<proto::TransactionResponse, TransportError> {
        self.unary(node, method, transaction, timeout).await
    }

    async fn query(
        &self,
        node: &NodeAddress,
        method: ServiceMethod,
        query: proto::Query,
        timeout: Duration,
    ) -> Result<proto::Response, TransportError> {
        self.unary(node, method, query, timeout).await
    }
}
