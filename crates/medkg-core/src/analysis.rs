//! Question analysis: the external extractor and classifier seams.
//!
//! Implementations wrap statistical models and are treated as unreliable.
//! Their output is raw: labels are plain strings that the adapter validates.

use crate::error::ExtractionFailure;
use crate::types::RawEntity;

/// Text → ordered sequence of named entities.
pub trait EntityExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Result<Vec<RawEntity>, ExtractionFailure>;
}

/// Text → one intent label.
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<String, ExtractionFailure>;
}

/// An extractor that never finds anything. Useful when only the lexicon
/// fallback should be exercised.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEntities;

impl EntityExtractor for NoEntities {
    fn extract(&self, _text: &str) -> Result<Vec<RawEntity>, ExtractionFailure> {
        Ok(Vec::new())
    }
}

/// A classifier that always answers with the same label.
#[derive(Debug, Clone)]
pub struct FixedIntent(pub String);

impl IntentClassifier for FixedIntent {
    fn classify(&self, _text: &str) -> Result<String, ExtractionFailure> {
        Ok(self.0.clone())
    }
}
