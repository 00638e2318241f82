//! Error types for MedKG operations.
//!
//! Only configuration errors are fatal. Extraction and graph failures are
//! expected at runtime and get converted into advisory context strings by the
//! dispatcher; they never cross the pipeline boundary.

use crate::types::Intent;
use thiserror::Error;

/// Result type for MedKG operations.
pub type Result<T> = std::result::Result<T, MedkgError>;

/// Top-level error.
#[derive(Debug, Error)]
pub enum MedkgError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionFailure),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors reported by a graph store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The store could not be reached at all.
    #[error("graph store unavailable: {0}")]
    Unavailable(String),

    /// The store was reached but rejected or failed the query.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// A required parameter was not bound.
    #[error("malformed query: missing parameter `{0}`")]
    MalformedQuery(String),
}

/// An external extractor or classifier failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{component}: {message}")]
pub struct ExtractionFailure {
    pub component: String,
    pub message: String,
}

impl ExtractionFailure {
    pub fn new(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            message: message.into(),
        }
    }
}

/// Configuration errors. These abort startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A recognized intent has no query template.
    #[error("no query template registered for intent `{0}`")]
    MissingTemplate(Intent),

    /// A template requires an entity type the shape cannot bind.
    #[error("template for `{intent}` is inconsistent: {reason}")]
    InconsistentTemplate { intent: Intent, reason: String },

    #[error("invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("invalid lexicon: {0}")]
    Lexicon(String),
}

impl MedkgError {
    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        MedkgError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_errors_convert_into_top_level() {
        let err: MedkgError = GraphError::Unavailable("connection refused".into()).into();
        assert_eq!(
            err.to_string(),
            "Graph error: graph store unavailable: connection refused"
        );
    }

    #[test]
    fn missing_template_names_the_intent() {
        let err = ConfigError::MissingTemplate(Intent::QueryDrug);
        assert!(err.to_string().contains("query_drug"));
    }
}
