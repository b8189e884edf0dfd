//! Query Pipeline
//!
//! [`Compute`] runs a raw line through the tokenizer and the analyzer. It owns
//! nothing but its two collaborators and keeps no state between calls.

use crate::compute::analyzer::Analyzer;
use crate::compute::parser::Parser;
use crate::compute::query::Query;
use crate::context::Context;
use crate::error::{DbError, DbResult};
use tracing::debug;

/// Turns a raw query line into tokens.
pub trait QueryParser {
    fn parse(&self, line: &str) -> DbResult<Vec<String>>;
}

/// Turns tokens into a validated [`Query`].
pub trait QueryAnalyzer {
    fn analyze(&self, tokens: Vec<String>) -> DbResult<Query>;
}

impl QueryParser for Parser {
    fn parse(&self, line: &str) -> DbResult<Vec<String>> {
        Parser::parse(self, line)
    }
}

impl QueryAnalyzer for Analyzer {
    fn analyze(&self, tokens: Vec<String>) -> DbResult<Query> {
        Analyzer::analyze(self, tokens)
    }
}

/// Tokenizer + analyzer, in that order.
#[derive(Debug, Clone)]
pub struct Compute<P = Parser, A = Analyzer> {
    parser: P,
    analyzer: A,
}

impl Default for Compute {
    fn default() -> Self {
        Self::new(Parser::new(), Analyzer::new())
    }
}

impl<P: QueryParser, A: QueryAnalyzer> Compute<P, A> {
    pub fn new(parser: P, analyzer: A) -> Self {
        Self { parser, analyzer }
    }

    /// Parses and validates one query line.
    ///
    /// Cancellation is only looked at on entry: a cancelled `ctx` returns
    /// [`DbError::Cancelled`] without touching the line. Errors from the
    /// parser or analyzer are returned as-is.
    pub fn handle_query(&self, ctx: &Context, line: &str) -> DbResult<Query> {
        if ctx.is_cancelled() {
            debug!("query cancelled");
            return Err(DbError::Cancelled);
        }

        let tokens = self.parser.parse(line)?;
        self.analyzer.analyze(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::query::CommandId;
    use std::cell::Cell;

    /// Parser fake that counts calls and returns a canned result.
    struct FakeParser {
        calls: Cell<usize>,
        result: DbResult<Vec<String>>,
    }

    impl QueryParser for FakeParser {
        fn parse(&self, _line: &str) -> DbResult<Vec<String>> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    struct FakeAnalyzer {
        calls: Cell<usize>,
    }

    impl QueryAnalyzer for FakeAnalyzer {
        fn analyze(&self, tokens: Vec<String>) -> DbResult<Query> {
            self.calls.set(self.calls.get() + 1);
            Ok(Query::new(CommandId::Get, tokens))
        }
    }

    fn fakes(result: DbResult<Vec<String>>) -> Compute<FakeParser, FakeAnalyzer> {
        Compute::new(
            FakeParser {
                calls: Cell::new(0),
                result,
            },
            FakeAnalyzer {
                calls: Cell::new(0),
            },
        )
    }

    #[test]
    fn test_handle_query() {
        let compute: Compute = Compute::default();
        let query = compute
            .handle_query(&Context::background(), "SET a b")
            .unwrap();
        assert_eq!(
            query,
            Query::new(CommandId::Set, vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_handle_query_propagates_errors() {
        let compute: Compute = Compute::default();
        let ctx = Context::background();

        assert_eq!(
            compute.handle_query(&ctx, "GET a?"),
            Err(DbError::InvalidSymbol)
        );
        assert_eq!(
            compute.handle_query(&ctx, "   "),
            Err(DbError::InvalidCommand)
        );
        assert_eq!(
            compute.handle_query(&ctx, "FOO"),
            Err(DbError::InvalidCommand)
        );
        assert_eq!(
            compute.handle_query(&ctx, "SET a"),
            Err(DbError::InvalidArguments)
        );
    }

    #[test]
    fn test_cancelled_context_skips_pipeline() {
        let compute = fakes(Ok(vec!["GET".to_string()]));
        let (ctx, handle) = Context::with_cancel();
        handle.cancel();

        assert_eq!(
            compute.handle_query(&ctx, "SET a b"),
            Err(DbError::Cancelled)
        );
        assert_eq!(compute.parser.calls.get(), 0);
        assert_eq!(compute.analyzer.calls.get(), 0);
    }

    #[test]
    fn test_parser_error_short_circuits() {
        let compute = fakes(Err(DbError::InvalidSymbol));

        assert_eq!(
            compute.handle_query(&Context::background(), "anything"),
            Err(DbError::InvalidSymbol)
        );
        assert_eq!(compute.parser.calls.get(), 1);
        assert_eq!(compute.analyzer.calls.get(), 0);
    }

    #[test]
    fn test_compute_is_reusable() {
        let compute = fakes(Ok(vec!["k".to_string()]));
        let ctx = Context::background();

        for _ in 0..3 {
            let query = compute.handle_query(&ctx, "GET k").unwrap();
            assert_eq!(query.arguments(), ["k"]);
        }
        assert_eq!(compute.parser.calls.get(), 3);
        assert_eq!(compute.analyzer.calls.get(), 3);
    }
}
