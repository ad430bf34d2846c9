use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::tag::TypeTag;

/// One declared attribute: a name and its type tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub tag: TypeTag,
}

/// An ordered sequence of attribute declarations with unique names.
///
/// Declaration order is preserved for display and rendering; lookups are by
/// name. An empty schema is legal at this layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    attributes: Vec<Attribute>,
}

impl Schema {
    /// Build a schema, rejecting duplicate attribute names.
    pub fn new(
        attributes: impl IntoIterator<Item = (String, TypeTag)>,
    ) -> Result<Self, SchemaError> {
        let mut out: Vec<Attribute> = Vec::new();
        for (name, tag) in attributes {
            if out.iter().any(|a| a.name == name) {
                return Err(SchemaError::DuplicateAttribute { name });
            }
            out.push(Attribute { name, tag });
        }
        Ok(Self { attributes: out })
    }

    /// A schema with no attributes.
    pub fn empty() -> Self {
        Self {
            attributes: Vec::new(),
        }
    }

    /// The declared tag of `name`, if the attribute exists.
    pub fn tag_of(&self, name: &str) -> Option<TypeTag> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.tag)
    }

    /// Whether `name` is a declared attribute.
    pub fn contains(&self, name: &str) -> bool {
        self.tag_of(name).is_some()
    }

    /// Attributes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
