//! Append-only chain store for chainscript.
//!
//! This crate owns the ledger's chaining and hashing discipline:
//! - [`Ledger`] — a named, schema-typed chain of sealed blocks plus the
//!   mutable pending buffer
//! - [`canonical_hash`] — domain-separated BLAKE3 over canonical key-sorted
//!   JSON, so structurally equal blocks hash identically
//! - [`verify_chain`] — genesis invariant, contiguous indexes, and
//!   link-by-link previous-hash verification
//! - [`read_snapshot`] / [`Ledger::export_snapshot`] — the
//!   `<name>_blockchain.json` round-trip
//!
//! Blocks are created only by sealing and are never mutated or removed; the
//! chain is never empty (construction seals the genesis block).

pub mod chain;
pub mod error;
pub mod hash;
pub mod ledger;
pub mod snapshot;

pub use chain::{verify_chain, ChainError};
pub use error::LedgerError;
pub use hash::canonical_hash;
pub use ledger::Ledger;
pub use snapshot::{read_snapshot, snapshot_filename};
