//! # Eventure Graph
//!
//! Neo4j-backed preference graph for the Eventure recommendation engine.
//!
//! Provides the graph client, mutation operations over User/Event/Category
//! nodes, similarity-based recommendation queries, and the full-rebuild
//! synchronizer from the relational source.

pub mod client;
pub mod mutate;
pub mod queries;
pub mod schema;
pub mod service;
pub mod sync;

#[cfg(feature = "test-utils")]
pub mod testutil;

pub use client::{GraphClient, GraphCounts};
pub use service::Engine;
pub use sync::{run_full_sync, SyncReport};
pub use sync::source::{RelationalSource, SqliteSource};
