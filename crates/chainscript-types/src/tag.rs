use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of types a schema attribute may declare.
///
/// Tags are spelled exactly as their DSL keywords: the scalar tags are
/// lowercase (`str`, `int`, `long`, `float`), the container tags are
/// capitalized (`List`, `Tuple`, `Dict`). Keyword matching is case-sensitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    #[serde(rename = "str")]
    Str,
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "long")]
    Long,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "List")]
    List,
    #[serde(rename = "Tuple")]
    Tuple,
    #[serde(rename = "Dict")]
    Dict,
}

impl TypeTag {
    /// All tags, in keyword-table order.
    pub const ALL: [TypeTag; 7] = [
        TypeTag::Str,
        TypeTag::Int,
        TypeTag::Long,
        TypeTag::Float,
        TypeTag::List,
        TypeTag::Tuple,
        TypeTag::Dict,
    ];

    /// Resolve a case-sensitive keyword to its tag, if it is one.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "str" => Some(TypeTag::Str),
            "int" => Some(TypeTag::Int),
            "long" => Some(TypeTag::Long),
            "float" => Some(TypeTag::Float),
            "List" => Some(TypeTag::List),
            "Tuple" => Some(TypeTag::Tuple),
            "Dict" => Some(TypeTag::Dict),
            _ => None,
        }
    }

    /// The DSL keyword spelling of this tag.
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeTag::Str => "str",
            TypeTag::Int => "int",
            TypeTag::Long => "long",
            TypeTag::Float => "float",
            TypeTag::List => "List",
            TypeTag::Tuple => "Tuple",
            TypeTag::Dict => "Dict",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
