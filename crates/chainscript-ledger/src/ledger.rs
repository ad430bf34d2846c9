use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use chainscript_types::{Block, Record, Schema, GENESIS_MARKER};

use crate::chain::{verify_chain, ChainError};
use crate::error::LedgerError;
use crate::hash::canonical_hash;

/// A named, schema-typed, append-only record ledger.
///
/// The chain is a sequence of immutable sealed blocks, never empty:
/// construction seals the genesis block. `pending` holds validated records
/// waiting to be sealed; sealing moves them into a new block whose
/// `previous_hash` chains it to its predecessor. Validation against the
/// schema is the executor's job — this layer stages whatever it is handed.
#[derive(Clone, Debug)]
pub struct Ledger {
    name: String,
    schema: Schema,
    chain: Vec<Block>,
    pending: Vec<Record>,
}

impl Ledger {
    /// Construct the ledger and seal its genesis block: index 1, empty data,
    /// placeholder proof and previous-hash. An empty schema is accepted.
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        let name = name.into();
        let genesis = Block {
            index: 1,
            timestamp: now_timestamp(),
            data: Vec::new(),
            proof: GENESIS_MARKER.into(),
            previous_hash: GENESIS_MARKER.into(),
        };
        debug!(ledger = %name, "ledger constructed with genesis block");
        Self {
            name,
            schema,
            chain: vec![genesis],
            pending: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The sealed chain, genesis first.
    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    /// Records staged but not yet sealed.
    pub fn pending(&self) -> &[Record] {
        &self.pending
    }

    pub fn chain_len(&self) -> usize {
        self.chain.len()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Stage a validated record. Infallible; no schema check here.
    pub fn stage(&mut self, record: Record) {
        self.pending.push(record);
    }

    /// Seal the pending buffer into a new block chained onto the last one.
    ///
    /// The proof is a timestamp-derived uniqueness token; it carries no
    /// work or difficulty. Sealing an empty pending buffer is permitted and
    /// produces an empty-data block.
    pub fn seal(&mut self) -> Result<Block, LedgerError> {
        let previous_hash = match self.chain.last() {
            Some(last) => canonical_hash(last)?,
            None => GENESIS_MARKER.into(),
        };

        let block = Block {
            index: (self.chain.len() + 1) as u64,
            timestamp: now_timestamp(),
            data: std::mem::take(&mut self.pending),
            proof: proof_token(),
            previous_hash,
        };
        debug!(
            ledger = %self.name,
            index = block.index,
            records = block.data.len(),
            "sealed block"
        );
        self.chain.push(block.clone());
        Ok(block)
    }

    /// Verify this ledger's own chain integrity.
    pub fn verify(&self) -> Result<(), ChainError> {
        verify_chain(&self.chain)
    }

    /// Serialize the full chain — never `pending` — as pretty-printed JSON,
    /// block order preserved.
    pub fn export_snapshot(&self) -> Result<Vec<u8>, LedgerError> {
        serde_json::to_vec_pretty(&self.chain)
            .map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    /// Persist the chain snapshot to `path`.
    pub fn write_snapshot(&self, path: &std::path::Path) -> Result<(), LedgerError> {
        let bytes = self.export_snapshot()?;
        std::fs::write(path, bytes).map_err(|e| LedgerError::Io(e.to_string()))?;
        debug!(ledger = %self.name, path = %path.display(), "exported snapshot");
        Ok(())
    }

    /// Human-readable rendering of the chain and pending buffer. Pure: never
    /// mutates either.
    pub fn render(&self) -> String {
        let mut out = format!(
            "--- LEDGER: {} ({} blocks, {} pending) ---\n",
            self.name,
            self.chain.len(),
            self.pending.len()
        );
        for block in &self.chain {
            let body = serde_json::to_string_pretty(block)
                .unwrap_or_else(|_| String::from("<unrenderable block>"));
            out.push_str(&body);
            out.push('\n');
        }
        out
    }
}

/// Seconds since the UNIX epoch, as the export format records timestamps.
fn now_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Timestamp-derived proof string for sealed blocks.
fn proof_token() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("proof-{millis}")
}
