//! # MedKG NLP
//!
//! Reference implementations of the question-analysis seams.
//!
//! - [`TemplateIntentClassifier`] scores a question against example
//!   utterances per intent using a character n-gram embedder.
//! - [`DictionaryEntityExtractor`] finds vocabulary terms by longest match.
//! - [`classify_term`] types a bare term by rule.
//!
//! None of these are statistical models. They are deterministic stand-ins
//! good enough to drive the pipeline end to end, and any model-backed
//! extractor or classifier can replace them through the core traits.
//!
//! ## Usage
//!
//! ```rust
//! use medkg_core::prelude::*;
//! use medkg_nlp::TemplateIntentClassifier;
//!
//! let classifier = TemplateIntentClassifier::builtin().unwrap();
//! assert_eq!(classifier.classify("高血压有什么症状").unwrap(), "query_symptom");
//! ```

mod dictionary;
mod embedder;
mod intent;
mod ngram;
mod typer;

pub use dictionary::DictionaryEntityExtractor;
pub use embedder::{cosine_similarity, Embedder, EmbeddingError, EmbeddingResult};
pub use intent::{Aggregation, IntentTemplates, TemplateIntentClassifier, DEFAULT_THRESHOLD};
pub use ngram::NgramEmbedder;
pub use typer::classify_term;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{classify_term, DictionaryEntityExtractor, TemplateIntentClassifier};
    pub use crate::{Aggregation, IntentTemplates};
    pub use crate::{Embedder, NgramEmbedder};
}
