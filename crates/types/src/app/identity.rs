// Path: crates/types/src/app/identity.rs

//! Ledger entity identifiers.
//!
//! Every ledger entity (account, file, topic) is addressed by a
//! `shard.realm.num` triple. The identifiers are small `Copy` values compared by
//! value; they are shared freely between builders and never mutated.

use crate::error::{CodecError, ValidationError};
use crate::proto;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $proto:ident, $num_field:ident) => {
        $(#[$meta])*
        #[derive(
            Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name {
            /// The shard number.
            pub shard: u64,
            /// The realm number within the shard.
            pub realm: u64,
            /// The entity number within the realm.
            pub num: u64,
        }

        impl $name {
            /// Creates an identifier from its three components.
            pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
                Self { shard, realm, num }
            }

            /// Shorthand for an entity in shard 0, realm 0.
            pub const fn from_num(num: u64) -> Self {
                Self::new(0, 0, num)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "\"{}\"", self)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let (shard, realm, num) = parse_triple(s)?;
                Ok(Self::new(shard, realm, num))
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.to_string()
            }
        }

        impl From<$name> for proto::$proto {
            fn from(id: $name) -> Self {
                proto::$proto {
                    shard_num: id.shard as i64,
                    realm_num: id.realm as i64,
                    $num_field: id.num as i64,
                }
            }
        }

        impl TryFrom<proto::$proto> for $name {
            type Error = CodecError;

            fn try_from(p: proto::$proto) -> Result<Self, Self::Error> {
                Ok(Self::new(
                    non_negative("shard_num", p.shard_num)?,
                    non_negative("realm_num", p.realm_num)?,
                    non_negative(stringify!($num_field), p.$num_field)?,
                ))
            }
        }
    };
}

entity_id!(
    /// Identifies an account. Network nodes are addressed by their account id too.
    AccountId,
    AccountId,
    account_num
);

entity_id!(
    /// Identifies a file.
    FileId,
    FileId,
    file_num
);

entity_id!(
    /// Identifies a consensus topic.
    TopicId,
    TopicId,
    topic_num
);

/// The account id of a network node. One operation attempt targets exactly one.
pub type NodeAccountId = AccountId;

fn parse_triple(s: &str) -> Result<(u64, u64, u64), ValidationError> {
    let invalid = || ValidationError::InvalidEntityId(s.to_string());
    let mut parts = s.trim().split('.');
    let mut next = || -> Result<u64, ValidationError> {
        parts
            .next()
            .ok_or_else(invalid)?
            .parse::<u64>()
            .map_err(|_| invalid())
    };
    let triple = (next()?, next()?, next()?);
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(triple)
}

fn non_negative(field: &'static str, v: i64) -> Result<u64, CodecError> {
    u64::try_from(v).map_err(|_| CodecError::InvalidValue {
        field,
        reason: format!("negative entity number {}", v),
    })
}
