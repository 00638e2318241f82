//! # MedKG RAG
//!
//! Query resolution and knowledge retrieval.
//!
//! A question arrives as an intent label plus a list of entities, either of
//! which may be missing or wrong. The dispatcher picks a strategy: run the
//! intent's graph query, first recover the missing entity from a keyword
//! lexicon, or answer with fixed advice. Graph rows are rendered into a
//! labelled context string for answer generation.
//!
//! | Stage | Module |
//! |-------|--------|
//! | raw labels → domain types | [`adapter`] |
//! | keyword recovery | [`lexicon`] |
//! | intent → query | [`templates`] |
//! | strategy selection | [`dispatcher`] |
//! | rows → context | [`formatter`] |
//! | all of the above | [`pipeline`] |

pub mod adapter;
pub mod dispatcher;
pub mod formatter;
pub mod lexicon;
pub mod pipeline;
pub mod prelude;
pub mod templates;

pub use dispatcher::Dispatcher;
pub use lexicon::Lexicon;
pub use pipeline::{MedicalQa, QaContext};
pub use templates::{QueryTemplate, TemplateRegistry};
