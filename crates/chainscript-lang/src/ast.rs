use serde::{Deserialize, Serialize};

use chainscript_types::{FieldValue, Schema};

/// A complete parsed program: exactly one definition, then at least one
/// operation, in source order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub definition: BlockDefinition,
    pub operations: Vec<Operation>,
}

/// The single schema declaration that opens every program.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockDefinition {
    pub name: String,
    pub schema: Schema,
}

/// One ledger operation. A closed sum type: dispatch is always an
/// exhaustive `match`, so adding a kind is a compile-time-checked change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    Add {
        target: String,
        fields: Vec<(String, FieldValue)>,
    },
    Print { target: String },
    View { target: String },
    Run { target: String },
    Mine { target: String },
    Export { target: String },
}

impl Operation {
    /// The ledger name this operation addresses.
    pub fn target(&self) -> &str {
        match self {
            Operation::Add { target, .. }
            | Operation::Print { target }
            | Operation::View { target }
            | Operation::Run { target }
            | Operation::Mine { target }
            | Operation::Export { target } => target,
        }
    }

    /// The DSL keyword that introduces this operation.
    pub fn keyword(&self) -> &'static str {
        match self {
            Operation::Add { .. } => "add",
            Operation::Print { .. } => "print",
            Operation::View { .. } => "view",
            Operation::Run { .. } => "run",
            Operation::Mine { .. } => "mine",
            Operation::Export { .. } => "export",
        }
    }
}
