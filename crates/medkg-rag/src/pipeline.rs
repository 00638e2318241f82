//! End-to-end question resolution: classify, extract, adapt, dispatch.

use crate::adapter;
use crate::dispatcher::Dispatcher;
use medkg_core::prelude::*;
use serde::Serialize;
use std::sync::Arc;

/// Everything known about a question before answer generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QaContext {
    pub query: String,
    pub intent: Intent,
    pub entities: Vec<Entity>,
    pub kg_context: String,
    /// False when `kg_context` is advice rather than graph facts.
    pub satisfied: bool,
}

/// Question → knowledge-graph context.
pub struct MedicalQa {
    extractor: Arc<dyn EntityExtractor>,
    classifier: Arc<dyn IntentClassifier>,
    dispatcher: Dispatcher,
}

impl MedicalQa {
    pub fn new(
        extractor: Arc<dyn EntityExtractor>,
        classifier: Arc<dyn IntentClassifier>,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            extractor,
            classifier,
            dispatcher,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Resolve a question. Extraction and classification failures are
    /// absorbed: a failed extractor means no entities, a failed classifier
    /// means `unknown_error`.
    pub fn answer_context(&self, query: &str) -> QaContext {
        tracing::info!(query, "resolving question");

        let raw_intent = match self.classifier.classify(query) {
            Ok(label) => label,
            Err(err) => {
                tracing::error!(error = %err, "intent classification failed");
                Intent::UnknownError.to_string()
            }
        };

        let raw_entities = match self.extractor.extract(query) {
            Ok(entities) => entities,
            Err(err) => {
                tracing::error!(error = %err, "entity extraction failed");
                Vec::new()
            }
        };

        let (intent, entities) = adapter::adapt(&raw_intent, raw_entities);
        tracing::info!(%intent, entities = entities.len(), "question analysed");

        let outcome = self.dispatcher.dispatch(query, intent, entities);
        QaContext {
            query: query.to_string(),
            intent,
            entities: outcome.entities,
            kg_context: outcome.context,
            satisfied: outcome.satisfied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::{INTENT_UNDETERMINED, NO_SYMPTOM};

    struct EmptyStore;

    impl GraphStore for EmptyStore {
        fn name(&self) -> &str {
            "empty"
        }

        fn run(&self, _: &QueryShape, _: &QueryParams) -> std::result::Result<Vec<ResultValue>, GraphError> {
            Ok(Vec::new())
        }
    }

    struct BrokenModel;

    impl EntityExtractor for BrokenModel {
        fn extract(&self, _: &str) -> std::result::Result<Vec<RawEntity>, ExtractionFailure> {
            Err(ExtractionFailure::new("ner", "model not loaded"))
        }
    }

    impl IntentClassifier for BrokenModel {
        fn classify(&self, _: &str) -> std::result::Result<String, ExtractionFailure> {
            Err(ExtractionFailure::new("intent", "model not loaded"))
        }
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::standard(Arc::new(EmptyStore)).unwrap()
    }

    #[test]
    fn classifier_failure_becomes_unknown_error() {
        let qa = MedicalQa::new(Arc::new(NoEntities), Arc::new(BrokenModel), dispatcher());
        let ctx = qa.answer_context("高血压吃什么药");
        assert_eq!(ctx.intent, Intent::UnknownError);
        assert_eq!(ctx.kg_context, INTENT_UNDETERMINED);
        assert!(!ctx.satisfied);
    }

    #[test]
    fn extractor_failure_means_no_entities() {
        let qa = MedicalQa::new(
            Arc::new(BrokenModel),
            Arc::new(FixedIntent("find_disease_by_symptom".into())),
            dispatcher(),
        );
        let ctx = qa.answer_context("我不舒服");
        assert!(ctx.entities.is_empty());
        assert_eq!(ctx.kg_context, NO_SYMPTOM);
    }

    #[test]
    fn context_serializes_for_json_output() {
        let qa = MedicalQa::new(
            Arc::new(NoEntities),
            Arc::new(FixedIntent("query_weather".into())),
            dispatcher(),
        );
        let json = serde_json::to_value(qa.answer_context("天气")).unwrap();
        assert_eq!(json["intent"], "unknown_intent");
        assert_eq!(json["satisfied"], false);
    }
}
