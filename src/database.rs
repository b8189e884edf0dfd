//! Database Façade
//!
//! Ties the query pipeline to storage: a raw line goes in, a printable
//! response comes out.
//!
//! ## Responses
//!
//! | Outcome                 | Response              |
//! |-------------------------|-----------------------|
//! | `SET` / `DEL` succeeded | `[ok]`                |
//! | `GET` found the key     | `[ok] <value>`        |
//! | `GET` missed            | `[not found]`         |
//! | any error               | `[error] <message>`   |

use crate::compute::{CommandId, Compute, Query};
use crate::context::Context;
use crate::error::{DbError, DbResult};
use crate::storage::{EngineStats, Storage};
use tracing::debug;

/// Result of executing one validated query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `SET` or `DEL` completed
    Done,
    /// `GET` found a value
    Value(String),
    /// `GET` found nothing
    NotFound,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Done => f.write_str("[ok]"),
            Outcome::Value(value) => write!(f, "[ok] {}", value),
            Outcome::NotFound => f.write_str("[not found]"),
        }
    }
}

/// A compute layer and a storage layer working together.
#[derive(Debug)]
pub struct Database {
    compute: Compute,
    storage: Storage,
}

impl Database {
    pub fn new(compute: Compute, storage: Storage) -> Self {
        Self { compute, storage }
    }

    /// Counters of the storage engine, if it keeps any.
    pub fn engine_stats(&self) -> Option<EngineStats> {
        self.storage.engine_stats()
    }

    /// Handles one query line and renders the response text.
    pub fn handle_query(&mut self, ctx: &Context, line: &str) -> String {
        match self.execute_line(ctx, line) {
            Ok(outcome) => outcome.to_string(),
            Err(e) => format!("[error] {}", e),
        }
    }

    /// Parses, validates and executes one query line.
    pub fn execute_line(&mut self, ctx: &Context, line: &str) -> DbResult<Outcome> {
        let query = self.compute.handle_query(ctx, line)?;
        self.execute(ctx, query)
    }

    /// Executes a query the analyzer has already validated.
    pub fn execute(&mut self, ctx: &Context, query: Query) -> DbResult<Outcome> {
        let command = query.command_id();
        match command.arity() {
            None => return Err(DbError::InvalidCommand),
            Some(arity) if arity != query.arguments().len() => {
                return Err(DbError::InvalidArguments)
            }
            Some(_) => {}
        }

        let mut args = query.into_arguments().into_iter();
        let outcome = match (command, args.next(), args.next()) {
            (CommandId::Set, Some(key), Some(value)) => {
                self.storage.set(ctx, key, value)?;
                Outcome::Done
            }
            (CommandId::Get, Some(key), _) => match self.storage.get(ctx, &key)? {
                Some(value) => Outcome::Value(value),
                None => Outcome::NotFound,
            },
            (CommandId::Del, Some(key), _) => {
                self.storage.del(ctx, &key)?;
                Outcome::Done
            }
            _ => return Err(DbError::InvalidArguments),
        };

        debug!(%command, ?outcome, "query executed");
        Ok(outcome)
    }
}
