// Path: crates/api/src/transaction/mod.rs
//! Defines the `TransactionData` trait implemented by every operation kind.

use crate::transport::ServiceMethod;
use hgsdk_types::error::ValidationError;
use hgsdk_types::proto;
use std::fmt::Debug;

/// The operation-specific part of a transaction.
///
/// The lifecycle engine owns everything common to all operations (ids, nodes,
/// fee, memo, signatures); an implementation of this trait only knows how to
/// check and encode its own body.
pub trait TransactionData: Clone + Debug + Send + Sync + 'static {
    /// The RPC that accepts this operation.
    fn method(&self) -> ServiceMethod;

    /// Local checks run at freeze time, before anything is serialized.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Encodes the operation body placed in the envelope's oneof.
    fn to_body_data(&self) -> proto::transaction_body::Data;
}
