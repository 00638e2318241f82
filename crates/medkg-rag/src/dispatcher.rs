//! Retrieval dispatcher: decides, per (intent, entities), whether to query
//! the graph, recover entities from the lexicon first, or answer with an
//! advisory.
//!
//! The decision is a lookup in [`transition`]: each recognized intent names
//! the lexicon it may recover from and the advisory it falls back to. The
//! dispatcher holds no mutable state and is shared across requests.

use crate::formatter;
use crate::lexicon::Lexicon;
use crate::templates::{QueryTemplate, TemplateRegistry};
use medkg_core::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

/// Context when the intent could not be determined.
pub const INTENT_UNDETERMINED: &str = "无法确定用户的具体意图，建议提供通用的医疗建议。";
/// Context when no symptom could be found for a symptom search.
pub const NO_SYMPTOM: &str = "未能识别到具体症状，建议详细描述症状或咨询专业医生。";
pub const FOOD_AVOID_ADVICE: &str = "建议咨询医生了解具体的饮食禁忌，一般建议避免辛辣、油腻、生冷食物。";
pub const FOOD_RECOMMEND_ADVICE: &str = "建议咨询医生了解具体的饮食建议，一般建议多吃新鲜蔬菜水果，保持营养均衡。";
pub const DEPARTMENT_ADVICE: &str = "建议先到内科进行初步检查，医生会根据具体症状推荐合适的专科。";
/// Context when the graph store failed.
pub const QUERY_FAILED: &str = "知识图谱查询时发生错误。";

/// Advisory contexts. None of them come from the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    IntentUndetermined,
    NoSymptom,
    FoodAvoid,
    FoodRecommend,
    Department,
    /// Names the intent and asks for a disease.
    MissingDisease,
    /// Names the intent and asks for any medical entity.
    MissingEntity,
    QueryFailed,
}

impl Advisory {
    pub fn render(&self, intent: Intent) -> String {
        match self {
            Advisory::IntentUndetermined => INTENT_UNDETERMINED.to_string(),
            Advisory::NoSymptom => NO_SYMPTOM.to_string(),
            Advisory::FoodAvoid => FOOD_AVOID_ADVICE.to_string(),
            Advisory::FoodRecommend => FOOD_RECOMMEND_ADVICE.to_string(),
            Advisory::Department => DEPARTMENT_ADVICE.to_string(),
            Advisory::MissingDisease => format!(
                "虽然识别到意图为'{intent}'，但未能提取到具体的疾病实体，建议明确指出疾病名称。"
            ),
            Advisory::MissingEntity => format!(
                "虽然识别到意图为'{intent}'，但未能提取到具体的医疗实体，建议提供更具体的信息。"
            ),
            Advisory::QueryFailed => QUERY_FAILED.to_string(),
        }
    }
}

/// What to do when a recognized intent lacks its required entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Whether to scan the question with the lexicon of the required type.
    pub recover: bool,
    /// Advisory when the entity is still missing.
    pub on_missing: Advisory,
}

/// The transition table. `None` for the sentinel intents.
pub fn transition(intent: Intent) -> Option<Transition> {
    use Intent::*;
    let (recover, on_missing) = match intent {
        FindDiseaseBySymptom => (true, Advisory::NoSymptom),
        QueryFoodAvoid => (true, Advisory::FoodAvoid),
        QueryFoodRecommend => (true, Advisory::FoodRecommend),
        QueryDepartment => (true, Advisory::Department),
        QueryDrug | QuerySymptom | QueryCheck | QueryCureWay => (true, Advisory::MissingDisease),
        QueryPrevent | QueryCause | QueryDesc | QueryComplication => (false, Advisory::MissingEntity),
        UnknownIntent | UnknownError => return None,
    };
    Some(Transition { recover, on_missing })
}

/// Append `recovered` to `entities`, dropping repeats of (name, type).
pub fn merge_entities(entities: Vec<Entity>, recovered: Vec<Entity>) -> Vec<Entity> {
    let mut seen = HashSet::new();
    entities
        .into_iter()
        .chain(recovered)
        .filter(|e| seen.insert((e.name.clone(), e.entity_type)))
        .collect()
}

/// The retrieval state machine.
pub struct Dispatcher {
    store: Arc<dyn GraphStore>,
    registry: TemplateRegistry,
    lexicon: Lexicon,
}

impl Dispatcher {
    /// Validates the registry; an incomplete registry is a startup error.
    pub fn new(
        store: Arc<dyn GraphStore>,
        registry: TemplateRegistry,
        lexicon: Lexicon,
    ) -> std::result::Result<Self, ConfigError> {
        registry.validate()?;
        Ok(Self {
            store,
            registry,
            lexicon,
        })
    }

    /// Standard registry and the built-in lexicon.
    pub fn standard(store: Arc<dyn GraphStore>) -> std::result::Result<Self, ConfigError> {
        Self::new(store, TemplateRegistry::standard(), Lexicon::builtin()?)
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    /// Resolve one question. The returned context is never empty.
    pub fn dispatch(&self, text: &str, intent: Intent, entities: Vec<Entity>) -> RetrievalOutcome {
        let (Some(rule), Some(template)) = (transition(intent), self.registry.template_for(intent))
        else {
            tracing::warn!(%intent, "no retrieval strategy for intent");
            return RetrievalOutcome::advisory(Advisory::IntentUndetermined.render(intent), entities);
        };

        if let Some(params) = template.bind(&entities) {
            return self.lookup(template, &params, entities);
        }

        let mut entities = entities;
        if rule.recover {
            let recovered = self.lexicon.extract(text, template.required);
            if !recovered.is_empty() {
                tracing::info!(
                    %intent,
                    recovered = recovered.len(),
                    kind = %template.required,
                    "entities recovered from lexicon"
                );
                entities = merge_entities(entities, recovered);
                if let Some(params) = template.bind(&entities) {
                    return self.lookup(template, &params, entities);
                }
            }
        }

        tracing::warn!(%intent, kind = %template.required, "required entity missing");
        RetrievalOutcome::advisory(rule.on_missing.render(intent), entities)
    }

    fn lookup(&self, template: &QueryTemplate, params: &QueryParams, entities: Vec<Entity>) -> RetrievalOutcome {
        tracing::debug!(
            intent = %template.intent,
            store = self.store.name(),
            shape = ?template.shape,
            ?params,
            "issuing graph query"
        );

        match self.store.run(&template.shape, params) {
            Ok(rows) => {
                let context = formatter::format(template.intent, &rows);
                tracing::info!(intent = %template.intent, rows = rows.len(), "graph lookup finished");
                RetrievalOutcome::lookup(context, entities)
            }
            Err(err) => {
                tracing::error!(intent = %template.intent, error = %err, "graph query failed");
                RetrievalOutcome::advisory(Advisory::QueryFailed.render(template.intent), entities)
            }
        }
    }
}
