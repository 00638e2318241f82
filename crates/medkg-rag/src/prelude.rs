//! MedKG RAG Prelude: convenient imports for common usage.
//!
//! ```rust
//! use medkg_rag::prelude::*;
//! ```

pub use crate::adapter::{adapt, adapt_entities, adapt_intent};
pub use crate::dispatcher::{transition, Advisory, Dispatcher, Transition};
pub use crate::formatter::{format as format_rows, NOTHING_FOUND};
pub use crate::lexicon::Lexicon;
pub use crate::pipeline::{MedicalQa, QaContext};
pub use crate::templates::{Projection, QueryTemplate, TemplateRegistry};

// Re-export from core
pub use medkg_core::prelude::*;
