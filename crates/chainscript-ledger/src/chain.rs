use chainscript_types::{Block, GENESIS_MARKER};

use crate::error::LedgerError;
use crate::hash::canonical_hash;

/// Errors from chain verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("chain is empty; every ledger starts with a genesis block")]
    Empty,

    #[error("genesis invariant violated: {reason}")]
    BadGenesis { reason: String },

    #[error("block at position {position} has index {index}, expected {expected}")]
    BadIndex {
        position: usize,
        index: u64,
        expected: u64,
    },

    #[error("broken link at index {index}: previous_hash does not match the preceding block")]
    BrokenLink { index: u64 },

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<LedgerError> for ChainError {
    fn from(e: LedgerError) -> Self {
        ChainError::Serialization(e.to_string())
    }
}

/// Verify a chain of sealed blocks.
///
/// Checks:
/// 1. The chain is non-empty and opens with a genesis block carrying the
///    placeholder proof and previous-hash (both [`GENESIS_MARKER`])
/// 2. Indexes are 1-based and contiguous
/// 3. Every later block's `previous_hash` equals the canonical hash of the
///    block before it
pub fn verify_chain(blocks: &[Block]) -> Result<(), ChainError> {
    let genesis = blocks.first().ok_or(ChainError::Empty)?;

    if genesis.index != 1 {
        return Err(ChainError::BadGenesis {
            reason: format!("index is {}, expected 1", genesis.index),
        });
    }
    if genesis.proof != GENESIS_MARKER {
        return Err(ChainError::BadGenesis {
            reason: format!("proof is {:?}, expected {:?}", genesis.proof, GENESIS_MARKER),
        });
    }
    if genesis.previous_hash != GENESIS_MARKER {
        return Err(ChainError::BadGenesis {
            reason: format!(
                "previous_hash is {:?}, expected {:?}",
                genesis.previous_hash, GENESIS_MARKER
            ),
        });
    }

    for (position, block) in blocks.iter().enumerate().skip(1) {
        let expected = (position + 1) as u64;
        if block.index != expected {
            return Err(ChainError::BadIndex {
                position,
                index: block.index,
                expected,
            });
        }

        let expected_prev = canonical_hash(&blocks[position - 1])?;
        if block.previous_hash != expected_prev {
            return Err(ChainError::BrokenLink { index: block.index });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainscript_types::{FieldValue, Record};

    fn genesis() -> Block {
        Block {
            index: 1,
            timestamp: 1_700_000_000.0,
            data: vec![],
            proof: GENESIS_MARKER.into(),
            previous_hash: GENESIS_MARKER.into(),
        }
    }

    fn build_chain(count: usize) -> Vec<Block> {
        let mut chain = vec![genesis()];
        for i in 1..count {
            let mut record = Record::new();
            record.insert("n".into(), FieldValue::Int(i as i64));
            let previous_hash = canonical_hash(&chain[i - 1]).unwrap();
            chain.push(Block {
                index: (i + 1) as u64,
                timestamp: 1_700_000_000.0 + i as f64,
                data: vec![record],
                proof: format!("proof-{i}"),
                previous_hash,
            });
        }
        chain
    }

    #[test]
    fn empty_chain_is_invalid() {
        assert_eq!(verify_chain(&[]).unwrap_err(), ChainError::Empty);
    }

    #[test]
    fn genesis_only_chain_is_valid() {
        verify_chain(&build_chain(1)).unwrap();
    }

    #[test]
    fn multi_block_chain_is_valid() {
        verify_chain(&build_chain(5)).unwrap();
    }

    #[test]
    fn genesis_with_real_hash_fails() {
        let mut chain = build_chain(1);
        chain[0].previous_hash = "ab".repeat(32);
        let err = verify_chain(&chain).unwrap_err();
        assert!(matches!(err, ChainError::BadGenesis { .. }));
    }

    #[test]
    fn genesis_with_wrong_proof_fails() {
        let mut chain = build_chain(1);
        chain[0].proof = "proof-0".into();
        assert!(matches!(
            verify_chain(&chain).unwrap_err(),
            ChainError::BadGenesis { .. }
        ));
    }

    #[test]
    fn gap_in_indexes_is_detected() {
        let mut chain = build_chain(3);
        chain[2].index = 5;
        assert_eq!(
            verify_chain(&chain).unwrap_err(),
            ChainError::BadIndex {
                position: 2,
                index: 5,
                expected: 3
            }
        );
    }

    #[test]
    fn tampered_middle_block_breaks_the_link_after_it() {
        let mut chain = build_chain(3);
        chain[1]
            .data[0]
            .insert("n".into(), FieldValue::Int(999));
        assert_eq!(
            verify_chain(&chain).unwrap_err(),
            ChainError::BrokenLink { index: 3 }
        );
    }

    #[test]
    fn wrong_previous_hash_is_detected() {
        let mut chain = build_chain(2);
        chain[1].previous_hash = "cd".repeat(32);
        assert_eq!(
            verify_chain(&chain).unwrap_err(),
            ChainError::BrokenLink { index: 2 }
        );
    }
}
