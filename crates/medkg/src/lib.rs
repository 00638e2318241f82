//! # MedKG
//!
//! Medical question answering over a knowledge graph.
//!
//! A question is classified into an intent, its medical entities are
//! extracted, and the dispatcher either runs the intent's graph query or
//! answers with fixed advice when the question cannot be resolved. The
//! resulting context string can be handed to an LLM for the final answer.
//!
//! ## Quick Start
//!
//! ```rust
//! use medkg::prelude::*;
//! use std::sync::Arc;
//!
//! // Build a tiny graph
//! let mut store = MemoryGraphStore::new();
//! store.relate("高血压", Relation::HasSymptom, "头晕");
//! store.relate("高血压", Relation::HasSymptom, "乏力");
//!
//! // Reference analysis components
//! let extractor = DictionaryEntityExtractor::from_typed(
//!     store.nodes().map(|n| (n.name.clone(), n.label)),
//! );
//! let classifier = TemplateIntentClassifier::builtin().unwrap();
//! let dispatcher = Dispatcher::standard(Arc::new(store)).unwrap();
//!
//! let qa = MedicalQa::new(Arc::new(extractor), Arc::new(classifier), dispatcher);
//! let ctx = qa.answer_context("高血压有什么症状");
//! assert_eq!(ctx.kg_context, "主要症状：头晕 、乏力");
//! ```
//!
//! ## Architecture
//!
//! - [`medkg_core`] - Entities, intents, query shapes, store and analysis traits
//! - [`medkg_graph`] - In-memory petgraph store, importer, snapshots, Neo4j store
//! - [`medkg_nlp`] - Template intent classifier and dictionary extractor
//! - [`medkg_rag`] - Adapter, lexicon fallback, templates, dispatcher, formatter
//! - `medkg_llm` - Answer generation (feature `llm`)
//!
//! ## Dispatch Outcomes
//!
//! | Situation | Context |
//! |-----------|---------|
//! | Intent undetermined | Fixed request to rephrase |
//! | Required entity present | Formatted graph rows, or "nothing found" |
//! | Entity recovered from the lexicon | Same as above |
//! | Entity still missing | Intent-specific advice |
//! | Graph store failure | "query failed" advice |

// Re-export all subcrates
pub use medkg_core as core;
pub use medkg_graph as graph;
pub use medkg_nlp as nlp;
pub use medkg_rag as rag;

#[cfg(feature = "llm")]
pub use medkg_llm as llm;

/// Prelude module for convenient imports.
///
/// ```rust
/// use medkg::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use medkg_core::prelude::*;

    // Graph stores
    pub use medkg_graph::{
        import_file, import_jsonl, load_store, save_snapshot, ImportReport, MemoryGraphStore,
        Neo4jConfig,
    };
    #[cfg(feature = "neo4j")]
    pub use medkg_graph::Neo4jStore;

    // Analysis
    pub use medkg_nlp::{
        classify_term, Aggregation, DictionaryEntityExtractor, IntentTemplates,
        TemplateIntentClassifier,
    };

    // Retrieval
    pub use medkg_rag::prelude::{
        adapt, format_rows, Dispatcher, Lexicon, MedicalQa, QaContext, QueryTemplate,
        TemplateRegistry, NOTHING_FOUND,
    };

    // Answer generation
    #[cfg(feature = "llm")]
    pub use medkg_llm::prelude::*;
}
