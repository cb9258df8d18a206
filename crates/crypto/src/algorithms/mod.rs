// Path: crates/crypto/src/algorithms/mod.rs
//! Hash algorithms.

pub mod hash;
