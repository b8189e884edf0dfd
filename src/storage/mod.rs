//! Storage Module
//!
//! The key-value side of the database.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  Storage                    │
//! │        (cancellation check per op)          │
//! └──────────────────────┬──────────────────────┘
//!                        │ Box<dyn Engine>
//!                        ▼
//! ┌─────────────────────────────────────────────┐
//! │   Engine trait: set / get / del             │
//! │   ┌──────────────┐   ┌──────────────────┐   │
//! │   │  HashTable   │◄──│  InMemoryEngine  │   │
//! │   └──────────────┘   └──────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use linekv::context::Context;
//! use linekv::storage::{in_memory_engine, Storage};
//!
//! let ctx = Context::background();
//! let mut storage = Storage::new(in_memory_engine());
//!
//! storage.set(&ctx, "name".to_string(), "value".to_string()).unwrap();
//! assert_eq!(storage.get(&ctx, "name").unwrap(), Some("value".to_string()));
//! ```

pub mod engine;
pub mod store;

// Re-export commonly used types
pub use engine::{in_memory_engine, Engine, EngineFactory, EngineStats, HashTable, InMemoryEngine};
pub use store::Storage;
