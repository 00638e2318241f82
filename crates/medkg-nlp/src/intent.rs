//! Template intent classifier.
//!
//! Every intent carries a list of example utterances. A question is embedded,
//! compared with each intent's utterances, the per-utterance similarities are
//! aggregated into one score per intent, and the best intent wins. Below the
//! threshold the answer is `unknown_intent`.

use crate::embedder::Embedder;
use crate::ngram::NgramEmbedder;
use medkg_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

const BUILTIN_TEMPLATES: &str = include_str!("../data/intents.toml");

/// Default minimum score for a confident classification.
pub const DEFAULT_THRESHOLD: f32 = 0.3;

/// How per-utterance similarities collapse into an intent score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Best single utterance.
    #[default]
    Max,
    /// Average over all utterances.
    Mean,
}

impl FromStr for Aggregation {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "max" => Ok(Aggregation::Max),
            "mean" => Ok(Aggregation::Mean),
            other => Err(ConfigError::InvalidValue {
                field: "intent.aggregation".to_string(),
                value: other.to_string(),
                reason: "expected \"max\" or \"mean\"".to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TemplateEntry {
    utterances: Vec<String>,
}

/// Utterance templates keyed by intent.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentTemplates(BTreeMap<Intent, Vec<String>>);

impl IntentTemplates {
    /// The templates shipped with the crate.
    pub fn builtin() -> std::result::Result<Self, ConfigError> {
        Self::parse(BUILTIN_TEMPLATES)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content)?)
    }

    /// Parse `[intent_label] utterances = [...]` tables.
    ///
    /// Unknown labels, sentinel intents and empty utterance lists are
    /// configuration errors.
    pub fn parse(content: &str) -> std::result::Result<Self, ConfigError> {
        let raw: BTreeMap<String, TemplateEntry> =
            toml::from_str(content).map_err(|e| ConfigError::InvalidValue {
                field: "intent templates".to_string(),
                value: "toml".to_string(),
                reason: e.to_string(),
            })?;

        let mut templates = BTreeMap::new();
        for (label, entry) in raw {
            let intent = Intent::from_label(&label)
                .filter(Intent::is_recognized)
                .ok_or_else(|| ConfigError::InvalidValue {
                    field: "intent templates".to_string(),
                    value: label.clone(),
                    reason: "not a recognized intent".to_string(),
                })?;
            let utterances: Vec<String> = entry
                .utterances
                .into_iter()
                .filter(|u| !u.trim().is_empty())
                .collect();
            if utterances.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "intent templates".to_string(),
                    value: label,
                    reason: "no utterances".to_string(),
                });
            }
            templates.insert(intent, utterances);
        }
        Ok(Self(templates))
    }

    pub fn intents(&self) -> impl Iterator<Item = Intent> + '_ {
        self.0.keys().copied()
    }

    pub fn utterances(&self, intent: Intent) -> &[String] {
        self.0.get(&intent).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Similarity-based intent classifier.
pub struct TemplateIntentClassifier<E: Embedder = NgramEmbedder> {
    embedder: E,
    /// Pre-computed utterance vectors per intent.
    templates: Vec<(Intent, Vec<Vec<f32>>)>,
    aggregation: Aggregation,
    threshold: f32,
}

impl TemplateIntentClassifier<NgramEmbedder> {
    /// Built-in templates with the default embedder, max aggregation and
    /// threshold 0.3.
    pub fn builtin() -> std::result::Result<Self, ConfigError> {
        Self::new(NgramEmbedder::default(), &IntentTemplates::builtin()?)
    }
}

impl<E: Embedder> TemplateIntentClassifier<E> {
    pub fn new(embedder: E, templates: &IntentTemplates) -> std::result::Result<Self, ConfigError> {
        let mut encoded = Vec::with_capacity(templates.len());
        for intent in templates.intents() {
            let utterances: Vec<&str> = templates.utterances(intent).iter().map(String::as_str).collect();
            let vectors = embedder
                .embed_batch(&utterances)
                .map_err(|e| ConfigError::InvalidValue {
                    field: "intent templates".to_string(),
                    value: intent.to_string(),
                    reason: e.to_string(),
                })?;
            encoded.push((intent, vectors));
        }

        tracing::info!(
            model = embedder.model_name(),
            intents = encoded.len(),
            "intent templates encoded"
        );

        Ok(Self {
            embedder,
            templates: encoded,
            aggregation: Aggregation::default(),
            threshold: DEFAULT_THRESHOLD,
        })
    }

    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Score every intent for a question, best first.
    pub fn rank(&self, text: &str) -> std::result::Result<Vec<(Intent, f32)>, ExtractionFailure> {
        let query = self
            .embedder
            .embed(text)
            .map_err(|e| ExtractionFailure::new("intent classifier", e.to_string()))?;

        let mut scores = Vec::with_capacity(self.templates.len());
        for (intent, vectors) in &self.templates {
            let mut sims = Vec::with_capacity(vectors.len());
            for vector in vectors {
                let sim = self
                    .embedder
                    .similarity(&query, vector)
                    .map_err(|e| ExtractionFailure::new("intent classifier", e.to_string()))?;
                sims.push(sim);
            }
            scores.push((*intent, self.aggregate(&sims)));
        }

        scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        Ok(scores)
    }

    fn aggregate(&self, sims: &[f32]) -> f32 {
        if sims.is_empty() {
            return 0.0;
        }
        match self.aggregation {
            Aggregation::Max => sims.iter().copied().fold(f32::MIN, f32::max),
            Aggregation::Mean => sims.iter().sum::<f32>() / sims.len() as f32,
        }
    }
}

impl<E: Embedder> IntentClassifier for TemplateIntentClassifier<E> {
    fn classify(&self, text: &str) -> std::result::Result<String, ExtractionFailure> {
        if text.trim().is_empty() {
            return Ok(Intent::UnknownIntent.to_string());
        }

        let ranked = self.rank(text)?;
        let Some(&(best, score)) = ranked.first() else {
            return Ok(Intent::UnknownIntent.to_string());
        };

        tracing::debug!(intent = %best, score, threshold = self.threshold, "intent scored");
        if score < self.threshold {
            return Ok(Intent::UnknownIntent.to_string());
        }
        Ok(best.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> TemplateIntentClassifier {
        TemplateIntentClassifier::builtin().unwrap()
    }

    #[test]
    fn builtin_templates_cover_every_recognized_intent() {
        let templates = IntentTemplates::builtin().unwrap();
        for intent in Intent::recognized() {
            assert!(
                !templates.utterances(intent).is_empty(),
                "no utterances for {intent}"
            );
        }
    }

    #[test]
    fn classifies_typical_questions() {
        let classifier = classifier();
        let cases = [
            ("高血压有什么症状", "query_symptom"),
            ("糖尿病需要做什么检查", "query_check"),
            ("高血压应该挂什么科", "query_department"),
            ("肺炎是什么原因引起的", "query_cause"),
            ("介绍一下冠心病", "query_desc"),
            ("高血压有什么并发症", "query_complication"),
            ("我头疼发烧", "find_disease_by_symptom"),
        ];
        for (question, expected) in cases {
            assert_eq!(classifier.classify(question).unwrap(), expected, "{question}");
        }
    }

    #[test]
    fn unrelated_or_empty_text_is_unknown() {
        let classifier = classifier();
        assert_eq!(classifier.classify("股票明天会涨吗").unwrap(), "unknown_intent");
        assert_eq!(classifier.classify("hello").unwrap(), "unknown_intent");
        assert_eq!(classifier.classify("   ").unwrap(), "unknown_intent");
    }

    #[test]
    fn mean_aggregation_is_stricter() {
        let classifier = classifier().with_aggregation(Aggregation::Mean);
        assert_eq!(classifier.classify("高血压应该挂什么科").unwrap(), "unknown_intent");

        let lenient = classifier.with_threshold(0.1);
        assert_eq!(lenient.classify("糖尿病需要做什么检查").unwrap(), "query_check");
    }

    #[test]
    fn unknown_labels_are_configuration_errors() {
        let err = IntentTemplates::parse("[query_weather]\nutterances = [\"天气\"]").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = IntentTemplates::parse("[unknown_intent]\nutterances = [\"?\"]").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn aggregation_parses_from_config_strings() {
        assert_eq!("mean".parse::<Aggregation>().unwrap(), Aggregation::Mean);
        assert!("median".parse::<Aggregation>().is_err());
    }
}
