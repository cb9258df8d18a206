// Path: crates/types/src/prelude.rs

//! A curated set of commonly used traits and types.

pub use crate::app::{AccountId, FileId, Key, PublicKey, Receipt, Status, TopicId, TransactionId};
pub use crate::error::{Error, ErrorCode, ValidationError};

/// An extension trait for `Option` that turns a missing builder field into a
/// validation error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, E>`, returning the provided
    /// error if the option is `None`.
    fn required<E>(self, err: E) -> Result<T, E>;

    /// Fails with [`ValidationError::MissingField`] naming `field`.
    fn required_field(self, field: &'static str) -> Result<T, ValidationError>;
}

impl<T> OptionExt<T> for Option<T> {
    fn required<E>(self, err: E) -> Result<T, E> {
        self.ok_or(err)
    }

    fn required_field(self, field: &'static str) -> Result<T, ValidationError> {
        self.ok_or(ValidationError::MissingField(field))
    }
}
