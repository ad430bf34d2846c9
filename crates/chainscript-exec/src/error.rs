use thiserror::Error;

use chainscript_types::TypeTag;

/// The semantic error taxonomy. All four are recoverable: the offending
/// operation or record is skipped and the run continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("ledger '{name}' is already defined")]
    DuplicateDefinition { name: String },

    #[error("ledger '{name}' is not defined")]
    UndefinedLedger { name: String },

    #[error("attribute '{attribute}' is not in the schema of '{ledger}'")]
    UnknownAttribute { ledger: String, attribute: String },

    #[error("attribute '{attribute}' of '{ledger}' expected {expected}, got {actual}")]
    TypeMismatch {
        ledger: String,
        attribute: String,
        expected: TypeTag,
        actual: &'static str,
    },
}

/// Errors surfaced by the context's host-facing convenience operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    #[error("semantic error: {0}")]
    Semantic(#[from] SemanticError),

    #[error("ledger error: {0}")]
    Ledger(#[from] chainscript_ledger::LedgerError),
}
