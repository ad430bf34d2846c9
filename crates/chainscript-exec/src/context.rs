//! The ledger registry: an explicitly owned name→[`Ledger`] map.
//!
//! The context is the single owner of every ledger it creates; no other
//! component constructs one. Hosts embedding the core get the per-ledger
//! convenience surface here (define / add / seal / export / render), with
//! the same all-or-nothing validation the executor applies. The context has
//! no built-in concurrency control — a host serving simultaneous callers
//! must serialize mutating calls per ledger name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use chainscript_ledger::{snapshot_filename, Ledger};
use chainscript_types::{Block, FieldValue, Record, Schema};

use crate::error::{ExecError, SemanticError};

/// Process state for one execution run: the name→ledger registry and the
/// directory exports land in.
#[derive(Debug)]
pub struct ExecutionContext {
    ledgers: HashMap<String, Ledger>,
    export_dir: PathBuf,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionContext {
    /// A fresh, empty registry. Exports land in the current directory.
    pub fn new() -> Self {
        Self {
            ledgers: HashMap::new(),
            export_dir: PathBuf::from("."),
        }
    }

    /// A fresh registry whose exports land under `dir`.
    pub fn with_export_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            ledgers: HashMap::new(),
            export_dir: dir.into(),
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Create and register a ledger. A duplicate name is rejected and the
    /// existing ledger is left untouched.
    pub fn define_ledger(
        &mut self,
        name: &str,
        schema: Schema,
    ) -> Result<&Ledger, SemanticError> {
        if self.ledgers.contains_key(name) {
            return Err(SemanticError::DuplicateDefinition {
                name: name.to_string(),
            });
        }
        debug!(ledger = name, attributes = schema.len(), "defining ledger");
        self.ledgers
            .insert(name.to_string(), Ledger::new(name, schema));
        Ok(&self.ledgers[name])
    }

    /// Read access to a ledger, if defined.
    pub fn ledger(&self, name: &str) -> Option<&Ledger> {
        self.ledgers.get(name)
    }

    /// Defined ledger names, sorted.
    pub fn ledger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.ledgers.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn ledger_count(&self) -> usize {
        self.ledgers.len()
    }

    fn ledger_mut(&mut self, name: &str) -> Result<&mut Ledger, SemanticError> {
        self.ledgers
            .get_mut(name)
            .ok_or_else(|| SemanticError::UndefinedLedger {
                name: name.to_string(),
            })
    }

    fn ledger_ref(&self, name: &str) -> Result<&Ledger, SemanticError> {
        self.ledgers
            .get(name)
            .ok_or_else(|| SemanticError::UndefinedLedger {
                name: name.to_string(),
            })
    }

    /// Validate and stage one record, all-or-nothing: if any field fails,
    /// nothing is staged and every failure is returned.
    pub fn add_record(
        &mut self,
        name: &str,
        fields: &[(String, FieldValue)],
    ) -> Result<(), Vec<SemanticError>> {
        let ledger = self.ledger_mut(name).map_err(|e| vec![e])?;
        let record = validate_record(ledger.schema(), name, fields)?;
        ledger.stage(record);
        Ok(())
    }

    /// Seal the named ledger's pending buffer into a new block.
    pub fn seal(&mut self, name: &str) -> Result<Block, ExecError> {
        let ledger = self.ledger_mut(name)?;
        Ok(ledger.seal()?)
    }

    /// Export the named ledger's chain to `<name>_blockchain.json` under the
    /// context's export directory. Returns the path written.
    pub fn export_snapshot(&self, name: &str) -> Result<PathBuf, ExecError> {
        let path = self.export_dir.join(snapshot_filename(name));
        self.export_snapshot_to(name, &path)?;
        Ok(path)
    }

    /// Export the named ledger's chain to an explicit path.
    pub fn export_snapshot_to(&self, name: &str, path: &Path) -> Result<(), ExecError> {
        let ledger = self.ledger_ref(name)?;
        ledger.write_snapshot(path)?;
        Ok(())
    }

    /// Human-readable rendering of the named ledger. Never mutates.
    pub fn render_chain(&self, name: &str) -> Result<String, SemanticError> {
        Ok(self.ledger_ref(name)?.render())
    }
}

/// Check every field of a candidate record against a schema, without
/// short-circuiting, so one `add` can report several errors at once.
///
/// Returns the validated record only if every field passed; otherwise all
/// collected failures. A field assigned twice keeps the last value, as a
/// key-sorted map insert does.
pub fn validate_record(
    schema: &Schema,
    ledger: &str,
    fields: &[(String, FieldValue)],
) -> Result<Record, Vec<SemanticError>> {
    let mut errors = Vec::new();
    let mut record = Record::new();

    for (attribute, value) in fields {
        match schema.tag_of(attribute) {
            None => errors.push(SemanticError::UnknownAttribute {
                ledger: ledger.to_string(),
                attribute: attribute.clone(),
            }),
            Some(tag) if !value.matches(tag) => errors.push(SemanticError::TypeMismatch {
                ledger: ledger.to_string(),
                attribute: attribute.clone(),
                expected: tag,
                actual: value.type_name(),
            }),
            Some(_) => {
                record.insert(attribute.clone(), value.clone());
            }
        }
    }

    if errors.is_empty() {
        Ok(record)
    } else {
        Err(errors)
    }
}
