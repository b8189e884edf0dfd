//! Command Analyzer
//!
//! Checks a token list against the fixed command table and turns it into a
//! [`Query`]. Token 0 is the command name, the rest are its arguments.
//!
//! ```text
//! tokens ──> lookup name ──> build Query ──> check arity ──> Query
//!               │                                │
//!               ▼                                ▼
//!         InvalidCommand                  InvalidArguments
//! ```

use crate::compute::query::{CommandId, Query};
use crate::error::{DbError, DbResult};
use std::collections::HashMap;
use tracing::debug;

/// Static description of one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    /// Which command this entry resolves to
    pub id: CommandId,
    /// Exact number of arguments required
    pub arity: usize,
}

/// Validates command names and argument counts.
///
/// The command table is built once in [`Analyzer::new`] and never changes.
#[derive(Debug, Clone)]
pub struct Analyzer {
    specs: HashMap<&'static str, CommandSpec>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    pub fn new() -> Self {
        let specs = CommandId::KNOWN
            .iter()
            .filter_map(|&id| id.arity().map(|arity| (id.name(), CommandSpec { id, arity })))
            .collect();

        Self { specs }
    }

    /// Looks up the table entry for a command name (case-sensitive).
    pub fn spec(&self, name: &str) -> Option<CommandSpec> {
        self.specs.get(name).copied()
    }

    /// Resolves the command and validates its arity.
    ///
    /// # Errors
    ///
    /// - [`DbError::InvalidCommand`] for empty input or an unknown name
    /// - [`DbError::InvalidArguments`] if the argument count is wrong
    pub fn analyze(&self, tokens: Vec<String>) -> DbResult<Query> {
        let mut tokens = tokens.into_iter();

        let Some(command) = tokens.next() else {
            debug!("empty query");
            return Err(DbError::InvalidCommand);
        };

        let Some(spec) = self.spec(&command) else {
            debug!(%command, "invalid command");
            return Err(DbError::InvalidCommand);
        };

        let query = Query::new(spec.id, tokens.collect());
        Self::check_arguments(&query, spec)?;

        debug!(%query, "query analyzed");
        Ok(query)
    }

    fn check_arguments(query: &Query, spec: CommandSpec) -> DbResult<()> {
        let args = query.arguments();
        if args.len() != spec.arity {
            debug!(
                command = %spec.id,
                expected = spec.arity,
                got = args.len(),
                ?args,
                "invalid arguments"
            );
            return Err(DbError::InvalidArguments);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_command_table() {
        let analyzer = Analyzer::new();
        assert_eq!(
            analyzer.spec("SET"),
            Some(CommandSpec { id: CommandId::Set, arity: 2 })
        );
        assert_eq!(
            analyzer.spec("GET"),
            Some(CommandSpec { id: CommandId::Get, arity: 1 })
        );
        assert_eq!(
            analyzer.spec("DEL"),
            Some(CommandSpec { id: CommandId::Del, arity: 1 })
        );
        assert_eq!(analyzer.spec("UNKNOWN"), None);
        assert_eq!(analyzer.spec("get"), None);
    }

    #[test]
    fn test_analyze_set() {
        let query = Analyzer::new().analyze(tokens(&["SET", "a", "b"])).unwrap();
        assert_eq!(query, Query::new(CommandId::Set, tokens(&["a", "b"])));
    }

    #[test]
    fn test_analyze_get_and_del() {
        let analyzer = Analyzer::new();

        let query = analyzer.analyze(tokens(&["GET", "key"])).unwrap();
        assert_eq!(query.command_id(), CommandId::Get);
        assert_eq!(query.arguments(), ["key"]);

        let query = analyzer.analyze(tokens(&["DEL", "key"])).unwrap();
        assert_eq!(query.command_id(), CommandId::Del);
        assert_eq!(query.arguments(), ["key"]);
    }

    #[test]
    fn test_analyze_empty() {
        assert_eq!(
            Analyzer::new().analyze(Vec::new()),
            Err(DbError::InvalidCommand)
        );
    }

    #[test]
    fn test_analyze_unknown_command() {
        let analyzer = Analyzer::new();
        assert_eq!(
            analyzer.analyze(tokens(&["FOO"])),
            Err(DbError::InvalidCommand)
        );
        assert_eq!(
            analyzer.analyze(tokens(&["set", "a", "b"])),
            Err(DbError::InvalidCommand)
        );
    }

    #[test]
    fn test_analyze_wrong_arity() {
        let analyzer = Analyzer::new();
        for words in [
            &["SET", "a"][..],
            &["SET"],
            &["SET", "a", "b", "c"],
            &["GET"],
            &["GET", "a", "b"],
            &["DEL"],
            &["DEL", "a", "b"],
        ] {
            assert_eq!(
                analyzer.analyze(tokens(words)),
                Err(DbError::InvalidArguments),
                "tokens {:?}",
                words
            );
        }
    }
}
