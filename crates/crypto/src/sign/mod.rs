// Path: crates/crypto/src/sign/mod.rs

pub mod eddsa;
pub mod key_tree;
