use chainscript_types::Block;

use crate::error::LedgerError;

/// Domain tag prepended to every block hash computation. Prevents a block
/// digest from colliding with any other JSON content hashed elsewhere.
pub const BLOCK_DOMAIN: &str = "chainscript-block-v1";

/// Hex BLAKE3 digest of a block's canonical serialization.
///
/// Canonicalization goes through `serde_json::Value`, whose object maps are
/// key-sorted, so two structurally equal blocks hash identically regardless
/// of field insertion order — the property the chain-integrity invariant
/// depends on.
pub fn canonical_hash(block: &Block) -> Result<String, LedgerError> {
    let canonical = serde_json::to_value(block)
        .map_err(|e| LedgerError::Serialization(e.to_string()))?;
    let encoded = serde_json::to_string(&canonical)
        .map_err(|e| LedgerError::Serialization(e.to_string()))?;

    let mut hasher = blake3::Hasher::new();
    hasher.update(BLOCK_DOMAIN.as_bytes());
    hasher.update(b":");
    hasher.update(encoded.as_bytes());
    Ok(hex::encode(hasher.finalize().as_bytes()))
}
