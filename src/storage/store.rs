//! Storage Layer
//!
//! [`Storage`] sits between executed queries and the engine. Its only job
//! besides forwarding is the cancellation check at the start of every
//! operation: a cancelled context never reaches the engine.

use crate::context::Context;
use crate::error::{DbError, DbResult};
use crate::storage::engine::{Engine, EngineStats};
use tracing::debug;

/// Cancellation-aware front for an [`Engine`].
pub struct Storage {
    engine: Box<dyn Engine>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

impl Storage {
    pub fn new(engine: Box<dyn Engine>) -> Self {
        Self { engine }
    }

    /// Stores `value` under `key`, overwriting any previous value.
    pub fn set(&mut self, ctx: &Context, key: String, value: String) -> DbResult<()> {
        check_cancelled(ctx)?;
        self.engine.set(key, value);
        Ok(())
    }

    /// Looks up `key`. `Ok(None)` means the key is absent.
    pub fn get(&self, ctx: &Context, key: &str) -> DbResult<Option<String>> {
        check_cancelled(ctx)?;
        Ok(self.engine.get(key))
    }

    /// Removes `key`. Removing an absent key succeeds.
    pub fn del(&mut self, ctx: &Context, key: &str) -> DbResult<()> {
        check_cancelled(ctx)?;
        self.engine.del(key);
        Ok(())
    }

    /// Counters of the underlying engine, if it keeps any.
    pub fn engine_stats(&self) -> Option<EngineStats> {
        self.engine.stats()
    }
}

#[inline]
fn check_cancelled(ctx: &Context) -> DbResult<()> {
    if ctx.is_cancelled() {
        debug!("storage operation cancelled");
        return Err(DbError::Cancelled);
    }
    Ok(())
}
