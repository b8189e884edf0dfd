//! Query Processing Module
//!
//! Everything between a raw query line and a validated [`Query`].
//!
//! ## Architecture
//!
//! ```text
//! "SET name value\n"
//!         │
//!         ▼
//! ┌─────────────────┐
//! │    Parser       │  character-class state machine
//! └────────┬────────┘
//!          │ ["SET", "name", "value"]
//!          ▼
//! ┌─────────────────┐
//! │    Analyzer     │  command table + arity check
//! └────────┬────────┘
//!          │ Query { Set, ["name", "value"] }
//!          ▼
//!       caller
//! ```
//!
//! [`Compute`] sequences the two stages. It only depends on the
//! [`QueryParser`] and [`QueryAnalyzer`] traits, so either stage can be
//! replaced with a fake in tests.
//!
//! ## Modules
//!
//! - `parser`: the tokenizer
//! - `analyzer`: command name and arity validation
//! - `query`: `Query` and `CommandId`
//! - `pipeline`: `Compute` and the stage traits

pub mod analyzer;
pub mod parser;
pub mod pipeline;
pub mod query;

// Re-export commonly used types for convenience
pub use analyzer::{Analyzer, CommandSpec};
pub use parser::Parser;
pub use pipeline::{Compute, QueryAnalyzer, QueryParser};
pub use query::{CommandId, Query};
