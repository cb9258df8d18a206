// Path: crates/tx/src/operations/mod.rs
//! Representative operation kinds. Each is a [`TransactionData`] body plus
//! typed setters on its `Transaction`.
//!
//! [`TransactionData`]: hgsdk_api::transaction::TransactionData

pub mod account_create;
pub mod file_append;
pub mod file_create;
pub mod topic_create;
pub mod topic_message_submit;
pub mod transfer;

pub use account_create::{AccountCreateData, AccountCreateTransaction};
pub use file_append::{FileAppendData, FileAppendTransaction};
pub use file_create::{FileCreateData, FileCreateTransaction};
pub use topic_create::{TopicCreateData, TopicCreateTransaction};
pub use topic_message_submit::{TopicMessageSubmitData, TopicMessageSubmitTransaction};
pub use transfer::{TransferData, TransferTransaction};
