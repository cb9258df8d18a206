// Path: crates/api/src/clock/mod.rs
//! The time source used to derive transaction valid-start times.

use hgsdk_types::app::Timestamp;

/// Supplies valid-start timestamps for new transaction ids.
///
/// Implementations must never return the same timestamp twice, so two ids
/// generated by one client for the same payer are always distinct.
pub trait Clock: Send + Sync {
    /// The timestamp to use as the valid start of the next transaction.
    fn valid_start(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn valid_start(&self) -> Timestamp {
        (**self).valid_start()
    }
}
