use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tag::TypeTag;

/// A literal runtime value carried by a record field.
///
/// The grammar can only produce string and number literals, so these three
/// variants are the whole value space. Serialization is untagged: a field
/// value reads back as a bare string or number in exported snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Float(f64),
}

impl FieldValue {
    /// Whether this value satisfies an attribute declared with `tag`.
    ///
    /// Policy (see DESIGN.md): strings match `str` only; integers match both
    /// `int` and `long` (one integer value space); floats match `float` only,
    /// with no int⇄float coercion. The container tags (`List`, `Tuple`,
    /// `Dict`) are declarable but no literal satisfies them.
    pub fn matches(&self, tag: TypeTag) -> bool {
        match (self, tag) {
            (FieldValue::Str(_), TypeTag::Str) => true,
            (FieldValue::Int(_), TypeTag::Int | TypeTag::Long) => true,
            (FieldValue::Float(_), TypeTag::Float) => true,
            _ => false,
        }
    }

    /// The value's own kind, for expected-vs-actual diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Str(_) => "str",
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
        }
    }

    /// Coerce a JSON value into a field value, as the web front end receives
    /// them: strings stay strings, whole numbers become integers, fractional
    /// numbers become floats. Booleans, nulls, arrays, and objects have no
    /// literal form and return `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(FieldValue::Str(s.clone())),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(FieldValue::Int(i))
                } else {
                    n.as_f64().map(FieldValue::Float)
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => write!(f, "\"{s}\""),
            FieldValue::Int(i) => write!(f, "{i}"),
            FieldValue::Float(x) => write!(f, "{x:?}"),
        }
    }
}
