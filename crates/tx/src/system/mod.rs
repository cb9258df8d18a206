// Path: crates/tx/src/system/mod.rs
//! Offline checks over wire transactions, as a node would run them.

pub mod validation;
