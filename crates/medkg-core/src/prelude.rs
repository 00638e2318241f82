//! MedKG Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use medkg_core::prelude::*;
//! ```

pub use crate::types::{Entity, EntityType, Intent, RawEntity, ResultValue, RetrievalOutcome};

pub use crate::query::{symptom_param, DiseaseProperty, QueryParams, QueryShape, Relation, NAME_PARAM};

pub use crate::store::GraphStore;

pub use crate::analysis::{EntityExtractor, FixedIntent, IntentClassifier, NoEntities};

pub use crate::error::{ConfigError, ExtractionFailure, GraphError, MedkgError, Result};
