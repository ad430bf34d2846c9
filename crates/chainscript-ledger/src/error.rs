use thiserror::Error;

/// Errors from ledger operations.
///
/// Sealing and exporting only fail on serialization or I/O trouble; there is
/// no failure path for normal input (an empty pending buffer still seals).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),
}
