//! # MedKG Graph
//!
//! Graph store backends and dataset loading.
//!
//! The in-memory store holds the medical knowledge graph in a petgraph
//! `DiGraph` and answers the fixed query shapes directly. The importer fills
//! it from JSON-lines disease records, and snapshots persist it between runs.
//! With the `neo4j` feature a store backed by a Neo4j server is available as
//! well.

pub mod import;
pub mod memory;
pub mod neo4j;
pub mod snapshot;

pub use import::{import_file, import_jsonl, ImportReport};
pub use memory::MemoryGraphStore;
pub use neo4j::Neo4jConfig;
#[cfg(feature = "neo4j")]
pub use neo4j::Neo4jStore;
pub use snapshot::{load_snapshot, load_store, save_snapshot, GraphSnapshot};
