//! Foundation types for chainscript.
//!
//! This crate provides the core data model shared by the language pipeline,
//! the ledger, and the executor. Every other chainscript crate depends on
//! `chainscript-types`.
//!
//! # Key Types
//!
//! - [`TypeTag`] — The closed set of attribute types a schema may declare
//! - [`FieldValue`] — A literal runtime value, with the tag-matching policy
//! - [`Schema`] — Ordered attribute declarations with unique names
//! - [`Record`] — A validated row, key-sorted for canonical serialization
//! - [`Block`] — A sealed, immutable segment of a ledger's chain

pub mod block;
pub mod error;
pub mod schema;
pub mod tag;
pub mod value;

pub use block::{Block, Record, GENESIS_MARKER};
pub use error::SchemaError;
pub use schema::{Attribute, Schema};
pub use tag::TypeTag;
pub use value::FieldValue;
