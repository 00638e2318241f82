//! Keyword fallback extractor.
//!
//! Two fixed term lists, one of symptoms and one of diseases. Every term that
//! occurs anywhere in the text yields one entity, in lexicon order. There is
//! no normalization, overlap resolution or de-duplication: 我头疼 yields both
//! 头疼 and 疼. The lexicon is immutable once loaded.

use medkg_core::prelude::*;
use serde::Deserialize;
use std::path::Path;

const BUILTIN_LEXICON: &str = include_str!("../data/lexicon.toml");

#[derive(Debug, Deserialize)]
struct LexiconFile {
    symptoms: TermList,
    diseases: TermList,
}

#[derive(Debug, Deserialize)]
struct TermList {
    terms: Vec<String>,
}

/// Symptom and disease keyword lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    symptoms: Vec<String>,
    diseases: Vec<String>,
}

impl Lexicon {
    /// The lexicon shipped with the crate.
    pub fn builtin() -> std::result::Result<Self, ConfigError> {
        Self::parse(BUILTIN_LEXICON)
    }

    /// Load a lexicon file with `[symptoms]` and `[diseases]` tables.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let lexicon = Self::parse(&content)?;
        tracing::info!(
            path = %path.display(),
            symptoms = lexicon.symptoms.len(),
            diseases = lexicon.diseases.len(),
            "lexicon loaded"
        );
        Ok(lexicon)
    }

    pub fn parse(content: &str) -> std::result::Result<Self, ConfigError> {
        let file: LexiconFile =
            toml::from_str(content).map_err(|e| ConfigError::Lexicon(e.to_string()))?;
        Self::new(file.symptoms.terms, file.diseases.terms)
    }

    /// Empty terms would match every text and are rejected.
    pub fn new(symptoms: Vec<String>, diseases: Vec<String>) -> std::result::Result<Self, ConfigError> {
        for (kind, terms) in [("symptoms", &symptoms), ("diseases", &diseases)] {
            if terms.iter().any(String::is_empty) {
                return Err(ConfigError::Lexicon(format!("empty term in {kind}")));
            }
        }
        Ok(Self { symptoms, diseases })
    }

    pub fn symptom_terms(&self) -> &[String] {
        &self.symptoms
    }

    pub fn disease_terms(&self) -> &[String] {
        &self.diseases
    }

    /// Symptom entities for every symptom term found in `text`.
    pub fn extract_symptoms(&self, text: &str) -> Vec<Entity> {
        scan(text, &self.symptoms, EntityType::Symptom)
    }

    /// Disease entities for every disease term found in `text`.
    pub fn extract_diseases(&self, text: &str) -> Vec<Entity> {
        scan(text, &self.diseases, EntityType::Disease)
    }

    /// Fallback for a required entity type. Only Symptom and Disease have
    /// lexicons; other types recover nothing.
    pub fn extract(&self, text: &str, entity_type: EntityType) -> Vec<Entity> {
        match entity_type {
            EntityType::Symptom => self.extract_symptoms(text),
            EntityType::Disease => self.extract_diseases(text),
            _ => Vec::new(),
        }
    }
}

fn scan(text: &str, terms: &[String], entity_type: EntityType) -> Vec<Entity> {
    terms
        .iter()
        .filter(|term| text.contains(term.as_str()))
        .map(|term| Entity::new(term.clone(), entity_type))
        .collect()
}
