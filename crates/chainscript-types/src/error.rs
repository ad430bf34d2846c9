use thiserror::Error;

/// Errors from schema construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("duplicate attribute '{name}' in schema")]
    DuplicateAttribute { name: String },
}
