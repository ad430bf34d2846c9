//! Shared server state: one execution context behind one lock.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chainscript_exec::ExecutionContext;
use chainscript_types::{Block, FieldValue, Record};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// The server's single pre-configured ledger, owned by an execution context
/// behind a `RwLock`. All mutation serializes through the write lock, which
/// is the locking discipline the core requires of its hosts.
pub struct AppState {
    ledger_name: String,
    ctx: RwLock<ExecutionContext>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Build the state and define the configured ledger in a fresh context.
    pub fn from_config(config: &ServerConfig) -> ServerResult<SharedState> {
        let mut ctx = ExecutionContext::with_export_dir(&config.export_dir);
        ctx.define_ledger(&config.ledger_name, config.schema.clone())
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        Ok(Arc::new(Self {
            ledger_name: config.ledger_name.clone(),
            ctx: RwLock::new(ctx),
        }))
    }

    pub fn ledger_name(&self) -> &str {
        &self.ledger_name
    }

    /// The sealed chain, genesis first.
    pub fn chain(&self) -> ServerResult<Vec<Block>> {
        let ctx = self.read()?;
        Ok(self.ledger(&ctx)?.chain().to_vec())
    }

    /// Records staged but not yet sealed.
    pub fn pending(&self) -> ServerResult<Vec<Record>> {
        let ctx = self.read()?;
        Ok(self.ledger(&ctx)?.pending().to_vec())
    }

    /// Coerce, validate, and stage one record; returns the new pending
    /// count. All-or-nothing: any failing field rejects the whole record.
    pub fn add_record(
        &self,
        fields: &BTreeMap<String, serde_json::Value>,
    ) -> ServerResult<usize> {
        let mut literals: Vec<(String, FieldValue)> = Vec::with_capacity(fields.len());
        for (attribute, value) in fields {
            let literal = FieldValue::from_json(value).ok_or_else(|| {
                ServerError::InvalidValue {
                    attribute: attribute.clone(),
                }
            })?;
            literals.push((attribute.clone(), literal));
        }

        let mut ctx = self.write()?;
        ctx.add_record(&self.ledger_name, &literals)
            .map_err(|errors| ServerError::RecordRejected {
                reasons: errors.iter().map(|e| e.to_string()).collect(),
            })?;
        drop(ctx);

        let ctx = self.read()?;
        Ok(self.ledger(&ctx)?.pending_len())
    }

    /// Seal pending records into a new block. Refuses an empty buffer —
    /// the front end's guard, not the core's.
    pub fn seal(&self) -> ServerResult<Block> {
        let mut ctx = self.write()?;
        let pending = ctx
            .ledger(&self.ledger_name)
            .ok_or_else(|| ServerError::Internal("configured ledger missing".into()))?
            .pending_len();
        if pending == 0 {
            return Err(ServerError::NothingToSeal);
        }
        ctx.seal(&self.ledger_name).map_err(|e| match e {
            chainscript_exec::ExecError::Ledger(e) => ServerError::Ledger(e),
            chainscript_exec::ExecError::Semantic(e) => ServerError::Internal(e.to_string()),
        })
    }

    /// The snapshot bytes, with a copy persisted under the export directory.
    /// Returns the bytes and the conventional filename.
    pub fn export(&self) -> ServerResult<(Vec<u8>, String)> {
        let ctx = self.read()?;
        ctx.export_snapshot(&self.ledger_name)
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        let bytes = self.ledger(&ctx)?.export_snapshot()?;
        Ok((bytes, chainscript_ledger::snapshot_filename(&self.ledger_name)))
    }

    fn ledger<'a>(
        &self,
        ctx: &'a std::sync::RwLockReadGuard<'_, ExecutionContext>,
    ) -> ServerResult<&'a chainscript_ledger::Ledger> {
        ctx.ledger(&self.ledger_name)
            .ok_or_else(|| ServerError::Internal("configured ledger missing".into()))
    }

    fn read(&self) -> ServerResult<std::sync::RwLockReadGuard<'_, ExecutionContext>> {
        self.ctx
            .read()
            .map_err(|_| ServerError::Internal("state lock poisoned".into()))
    }

    fn write(&self) -> ServerResult<std::sync::RwLockWriteGuard<'_, ExecutionContext>> {
        self.ctx
            .write()
            .map_err(|_| ServerError::Internal("state lock poisoned".into()))
    }
}
