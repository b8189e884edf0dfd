//! # linekv - A Minimal Line-Oriented Key-Value Store
//!
//! linekv is a single-node, in-memory key-value store driven by a tiny text
//! query language: one command per line, three commands in total.
//!
//! ```text
//! SET <key> <value>
//! GET <key>
//! DEL <key>
//! ```
//!
//! Keys and values are single tokens made of ASCII letters, digits and `_`.
//! Command names are case-sensitive.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          Database                             │
//! │                                                               │
//! │  raw line                                                     │
//! │     │                                                         │
//! │     ▼                                                         │
//! │  ┌─────────────────────── Compute ────────────────────────┐   │
//! │  │  ┌──────────┐   tokens   ┌──────────┐                  │   │
//! │  │  │  Parser  │──────────> │ Analyzer │──> Query         │   │
//! │  │  └──────────┘            └──────────┘                  │   │
//! │  └─────────────────────────────────────────────┬──────────┘   │
//! │                                                │              │
//! │                                                ▼              │
//! │  ┌─────────────────────── Storage ────────────────────────┐   │
//! │  │              Box<dyn Engine> (HashTable)               │   │
//! │  └────────────────────────────────────────────────────────┘   │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every top-level operation takes a [`Context`]. If it has been cancelled
//! when the operation starts, the operation returns [`DbError::Cancelled`]
//! and does nothing else.
//!
//! ## Quick Start
//!
//! ```
//! use linekv::compute::Compute;
//! use linekv::context::Context;
//! use linekv::database::Database;
//! use linekv::storage::{in_memory_engine, Storage};
//!
//! let mut db = Database::new(Compute::default(), Storage::new(in_memory_engine()));
//! let ctx = Context::background();
//!
//! assert_eq!(db.handle_query(&ctx, "SET name linekv"), "[ok]");
//! assert_eq!(db.handle_query(&ctx, "GET name"), "[ok] linekv");
//! assert_eq!(db.handle_query(&ctx, "GET name!"), "[error] invalid symbol");
//! ```
//!
//! ## Module Overview
//!
//! - [`compute`]: tokenizer, analyzer and the query pipeline
//! - [`storage`]: the `Engine` trait, engines and the storage layer
//! - [`database`]: executes validated queries and renders responses
//! - [`context`]: cooperative cancellation
//! - [`config`]: command-line configuration and initialization
//! - [`repl`]: the interactive read-eval-print loop

pub mod compute;
pub mod config;
pub mod context;
pub mod database;
pub mod error;
pub mod repl;
pub mod storage;

// Re-export commonly used types for convenience
pub use compute::{Analyzer, CommandId, Compute, Parser, Query};
pub use context::{CancelHandle, Context};
pub use database::{Database, Outcome};
pub use error::{DbError, DbResult, InitError};
pub use storage::{Engine, HashTable, Storage};

/// Version of linekv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
