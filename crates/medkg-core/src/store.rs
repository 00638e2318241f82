//! Graph store: where retrieval queries are executed.
//!
//! This is a trait rather than a concrete type so that the dispatcher can
//! run against the in-memory petgraph store, a remote Neo4j server, or a
//! test double without change.

use crate::error::GraphError;
use crate::query::{QueryParams, QueryShape};
use crate::types::ResultValue;

/// A labeled-node / typed-relation database.
pub trait GraphStore: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Execute a query. Rows come back unordered; `null` results are dropped
    /// by the store.
    fn run(&self, shape: &QueryShape, params: &QueryParams) -> Result<Vec<ResultValue>, GraphError>;
}

impl<G: GraphStore + ?Sized> GraphStore for std::sync::Arc<G> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&self, shape: &QueryShape, params: &QueryParams) -> Result<Vec<ResultValue>, GraphError> {
        (**self).run(shape, params)
    }
}
