//! Query template registry: intent → parameterized query + binding rule.
//!
//! Built once at startup and shared read-only. `validate` is the startup
//! check that every recognized intent has a consistent template.

use medkg_core::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// What a template's rows contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Name of the node at the end of the relation.
    TargetName,
    /// A Disease property value.
    Property,
    /// Distinct names of matching diseases.
    DistinctDiseaseName,
}

/// One intent's query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryTemplate {
    pub intent: Intent,
    pub shape: QueryShape,
    /// Entity type that must be present to bind the query.
    pub required: EntityType,
}

impl QueryTemplate {
    pub fn traverse(intent: Intent, relation: Relation) -> Self {
        Self {
            intent,
            shape: QueryShape::Traverse(relation),
            required: EntityType::Disease,
        }
    }

    pub fn property(intent: Intent, property: DiseaseProperty) -> Self {
        Self {
            intent,
            shape: QueryShape::Property(property),
            required: EntityType::Disease,
        }
    }

    pub fn symptom_conjunction(intent: Intent) -> Self {
        Self {
            intent,
            shape: QueryShape::SymptomConjunction,
            required: EntityType::Symptom,
        }
    }

    pub fn projection(&self) -> Projection {
        match self.shape {
            QueryShape::Traverse(_) => Projection::TargetName,
            QueryShape::Property(_) => Projection::Property,
            QueryShape::SymptomConjunction => Projection::DistinctDiseaseName,
        }
    }

    /// Bind parameters from entities, or `None` when no entity of the
    /// required type is present.
    ///
    /// Single-hop shapes take the first matching entity; the conjunction
    /// takes every Symptom entity in order.
    pub fn bind(&self, entities: &[Entity]) -> Option<QueryParams> {
        let mut matching = entities.iter().filter(|e| e.is(self.required));
        match self.shape {
            QueryShape::Traverse(_) | QueryShape::Property(_) => {
                matching.next().map(|e| QueryParams::named(e.name.as_str()))
            }
            QueryShape::SymptomConjunction => {
                let names: Vec<&str> = matching.map(|e| e.name.as_str()).collect();
                (!names.is_empty()).then(|| QueryParams::symptoms_of(names))
            }
        }
    }

    fn check(&self) -> std::result::Result<(), String> {
        let expected = match self.shape {
            QueryShape::Traverse(_) | QueryShape::Property(_) => EntityType::Disease,
            QueryShape::SymptomConjunction => EntityType::Symptom,
        };
        if self.required != expected {
            return Err(format!(
                "shape {:?} binds {} entities, template requires {}",
                self.shape, expected, self.required
            ));
        }
        Ok(())
    }
}

/// Intent → template lookup.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<Intent, QueryTemplate>,
}

impl TemplateRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The registry for the medical knowledge graph schema.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.insert(QueryTemplate::traverse(Intent::QuerySymptom, Relation::HasSymptom));
        registry.insert(QueryTemplate::traverse(Intent::QueryDrug, Relation::RecommendsDrug));
        registry.insert(QueryTemplate::traverse(Intent::QueryCheck, Relation::NeedsCheck));
        registry.insert(QueryTemplate::traverse(Intent::QueryFoodAvoid, Relation::AvoidsEat));
        registry.insert(QueryTemplate::traverse(Intent::QueryFoodRecommend, Relation::RecommendsEat));
        registry.insert(QueryTemplate::traverse(Intent::QueryDepartment, Relation::BelongsToDept));
        registry.insert(QueryTemplate::traverse(Intent::QueryComplication, Relation::HasComplication));
        registry.insert(QueryTemplate::property(Intent::QueryPrevent, DiseaseProperty::Prevent));
        registry.insert(QueryTemplate::property(Intent::QueryCause, DiseaseProperty::Cause));
        registry.insert(QueryTemplate::property(Intent::QueryCureWay, DiseaseProperty::CureWay));
        registry.insert(QueryTemplate::property(Intent::QueryDesc, DiseaseProperty::Desc));
        registry.insert(QueryTemplate::symptom_conjunction(Intent::FindDiseaseBySymptom));
        registry
    }

    /// Register or replace a template.
    pub fn insert(&mut self, template: QueryTemplate) {
        self.templates.insert(template.intent, template);
    }

    pub fn template_for(&self, intent: Intent) -> Option<&QueryTemplate> {
        self.templates.get(&intent)
    }

    /// Templates in intent order.
    pub fn iter(&self) -> impl Iterator<Item = &QueryTemplate> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Every recognized intent has a template, no sentinel has one, and each
    /// template's required type matches what its shape binds.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for intent in Intent::recognized() {
            let template = self
                .template_for(intent)
                .ok_or(ConfigError::MissingTemplate(intent))?;
            template
                .check()
                .map_err(|reason| ConfigError::InconsistentTemplate { intent, reason })?;
        }

        if let Some(template) = self.iter().find(|t| !t.intent.is_recognized()) {
            return Err(ConfigError::InconsistentTemplate {
                intent: template.intent,
                reason: "sentinel intents cannot have a query".to_string(),
            });
        }
        Ok(())
    }
}
