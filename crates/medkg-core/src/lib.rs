//! # MedKG Core
//!
//! Core types and traits for medical question resolution over a knowledge
//! graph.
//!
//! - [`types`] - entities, intents, result rows, retrieval outcomes
//! - [`query`] - the closed set of parameterized query shapes
//! - [`store`] - the graph store trait
//! - [`analysis`] - entity extractor and intent classifier traits
//! - [`error`] - error taxonomy
//!
//! ## Quick Start
//!
//! ```rust
//! use medkg_core::prelude::*;
//!
//! let entity = Entity::disease("高血压");
//! assert!(entity.is(EntityType::Disease));
//! assert_eq!(Intent::from_label("query_symptom"), Some(Intent::QuerySymptom));
//! ```

pub mod analysis;
pub mod error;
pub mod prelude;
pub mod query;
pub mod store;
pub mod types;
