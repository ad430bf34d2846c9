//! Snapshot naming and re-reading.
//!
//! An export writes the full chain to `<name>_blockchain.json`. Reading one
//! back and running [`verify_chain`](crate::verify_chain) over it is the
//! round-trip check: recomputing each canonical hash must reproduce the
//! recorded `previous_hash` of the following block.

use chainscript_types::Block;

use crate::error::LedgerError;

/// The conventional export filename for a ledger.
pub fn snapshot_filename(name: &str) -> String {
    format!("{name}_blockchain.json")
}

/// Parse an exported snapshot back into its chain, block order preserved.
pub fn read_snapshot(bytes: &[u8]) -> Result<Vec<Block>, LedgerError> {
    serde_json::from_slice(bytes).map_err(|e| LedgerError::Serialization(e.to_string()))
}
