use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

/// Placeholder proof and previous-hash value of every genesis block.
pub const GENESIS_MARKER: &str = "1";

/// A validated row of attribute→value pairs.
///
/// Backed by a `BTreeMap` so field order is key-sorted by construction and
/// the serialized form is canonical regardless of insertion order.
pub type Record = BTreeMap<String, FieldValue>;

/// A sealed segment of a ledger's chain. Immutable once created.
///
/// Field names match the exported snapshot format exactly: `index` is
/// 1-based, `timestamp` is seconds since the UNIX epoch, `previous_hash` is
/// the hex digest of the preceding block (or [`GENESIS_MARKER`] for the
/// genesis block).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64,
    pub data: Vec<Record>,
    pub proof: String,
    pub previous_hash: String,
}

impl Block {
    /// Whether this is a genesis block (chain position 1).
    pub fn is_genesis(&self) -> bool {
        self.index == 1
    }
}
