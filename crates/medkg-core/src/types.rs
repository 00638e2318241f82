//! Shared types used across all MedKG crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of entity (and graph node) types.
///
/// Node labels in the knowledge graph use exactly these names, so the same
/// enum doubles as the label vocabulary of the graph store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityType {
    Disease,
    Symptom,
    Drug,
    Check,
    Food,
    Department,
}

impl EntityType {
    /// Every entity type, in declaration order.
    pub const ALL: [EntityType; 6] = [
        EntityType::Disease,
        EntityType::Symptom,
        EntityType::Drug,
        EntityType::Check,
        EntityType::Food,
        EntityType::Department,
    ];

    /// The label used by extractors and by the graph store.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Disease => "Disease",
            EntityType::Symptom => "Symptom",
            EntityType::Drug => "Drug",
            EntityType::Check => "Check",
            EntityType::Food => "Food",
            EntityType::Department => "Department",
        }
    }

    /// Parse a label. Matching is exact; anything else is not a known type.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == label)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed named concept mentioned in a question.
///
/// Entities are value objects: two entities are the same entity when both
/// name and type match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
}

impl Entity {
    pub fn new(name: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            name: name.into(),
            entity_type,
        }
    }

    pub fn disease(name: impl Into<String>) -> Self {
        Self::new(name, EntityType::Disease)
    }

    pub fn symptom(name: impl Into<String>) -> Self {
        Self::new(name, EntityType::Symptom)
    }

    pub fn is(&self, entity_type: EntityType) -> bool {
        self.entity_type == entity_type
    }
}

/// An entity as reported by an external extractor, before adaptation.
///
/// The type is free text; only the six known labels survive adaptation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntity {
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: String,
}

impl RawEntity {
    pub fn new(name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entity_type: entity_type.into(),
        }
    }
}

/// The classified purpose of a question. Exactly one per question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    QuerySymptom,
    QueryDrug,
    QueryCheck,
    QueryPrevent,
    QueryCause,
    QueryCureWay,
    QueryDesc,
    QueryFoodAvoid,
    QueryFoodRecommend,
    QueryDepartment,
    QueryComplication,
    FindDiseaseBySymptom,
    /// The classifier could not settle on an intent.
    UnknownIntent,
    /// The classifier itself failed.
    UnknownError,
}

impl Intent {
    /// Every intent, sentinels last.
    pub const ALL: [Intent; 14] = [
        Intent::QuerySymptom,
        Intent::QueryDrug,
        Intent::QueryCheck,
        Intent::QueryPrevent,
        Intent::QueryCause,
        Intent::QueryCureWay,
        Intent::QueryDesc,
        Intent::QueryFoodAvoid,
        Intent::QueryFoodRecommend,
        Intent::QueryDepartment,
        Intent::QueryComplication,
        Intent::FindDiseaseBySymptom,
        Intent::UnknownIntent,
        Intent::UnknownError,
    ];

    /// Wire label, e.g. `query_symptom`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::QuerySymptom => "query_symptom",
            Intent::QueryDrug => "query_drug",
            Intent::QueryCheck => "query_check",
            Intent::QueryPrevent => "query_prevent",
            Intent::QueryCause => "query_cause",
            Intent::QueryCureWay => "query_cure_way",
            Intent::QueryDesc => "query_desc",
            Intent::QueryFoodAvoid => "query_food_avoid",
            Intent::QueryFoodRecommend => "query_food_recommend",
            Intent::QueryDepartment => "query_department",
            Intent::QueryComplication => "query_complication",
            Intent::FindDiseaseBySymptom => "find_disease_by_symptom",
            Intent::UnknownIntent => "unknown_intent",
            Intent::UnknownError => "unknown_error",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|i| i.as_str() == label)
    }

    /// True for every intent that has a graph-backed strategy.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Intent::UnknownIntent | Intent::UnknownError)
    }

    /// Recognized intents only.
    pub fn recognized() -> impl Iterator<Item = Intent> {
        Self::ALL.into_iter().filter(Intent::is_recognized)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value of one result row returned by the graph store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultValue {
    Text(String),
    List(Vec<String>),
}

impl ResultValue {
    /// Empty strings and empty lists carry no information and are dropped
    /// before formatting.
    pub fn is_empty(&self) -> bool {
        match self {
            ResultValue::Text(s) => s.is_empty(),
            ResultValue::List(items) => items.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResultValue::Text(s) => Some(s),
            ResultValue::List(_) => None,
        }
    }

    /// Render the value as one string, joining list items with `separator`.
    pub fn render(&self, separator: &str) -> String {
        match self {
            ResultValue::Text(s) => s.clone(),
            ResultValue::List(items) => items.join(separator),
        }
    }
}

impl From<&str> for ResultValue {
    fn from(s: &str) -> Self {
        ResultValue::Text(s.to_string())
    }
}

impl From<String> for ResultValue {
    fn from(s: String) -> Self {
        ResultValue::Text(s)
    }
}

impl From<Vec<String>> for ResultValue {
    fn from(items: Vec<String>) -> Self {
        ResultValue::List(items)
    }
}

/// What the dispatcher hands to answer generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalOutcome {
    /// Context string for the answer generator. Never empty.
    pub context: String,
    /// False when `context` is an advisory rather than a graph lookup result.
    pub satisfied: bool,
    /// The entities the decision was made on, including lexicon recoveries.
    pub entities: Vec<Entity>,
}

impl RetrievalOutcome {
    pub fn lookup(context: impl Into<String>, entities: Vec<Entity>) -> Self {
        Self {
            context: context.into(),
            satisfied: true,
            entities,
        }
    }

    pub fn advisory(context: impl Into<String>, entities: Vec<Entity>) -> Self {
        Self {
            context: context.into(),
            satisfied: false,
            entities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_labels_round_trip() {
        for intent in Intent::ALL {
            assert_eq!(Intent::from_label(intent.as_str()), Some(intent));
        }
        assert_eq!(Intent::from_label("query_weather"), None);
    }

    #[test]
    fn only_sentinels_are_unrecognized() {
        let recognized: Vec<_> = Intent::recognized().collect();
        assert_eq!(recognized.len(), 12);
        assert!(!recognized.contains(&Intent::UnknownIntent));
        assert!(!recognized.contains(&Intent::UnknownError));
    }

    #[test]
    fn entity_type_labels_are_exact() {
        assert_eq!(EntityType::from_label("Disease"), Some(EntityType::Disease));
        assert_eq!(EntityType::from_label("disease"), None);
        assert_eq!(EntityType::from_label("Gene"), None);
    }

    #[test]
    fn entity_serializes_with_type_key() {
        let json = serde_json::to_string(&Entity::disease("高血压")).unwrap();
        assert_eq!(json, r#"{"name":"高血压","type":"Disease"}"#);
    }

    #[test]
    fn result_value_deserializes_untagged() {
        let text: ResultValue = serde_json::from_str(r#""头晕""#).unwrap();
        let list: ResultValue = serde_json::from_str(r#"["药物治疗","支持性治疗"]"#).unwrap();
        assert_eq!(text, ResultValue::from("头晕"));
        assert_eq!(list.render("、"), "药物治疗、支持性治疗");
    }
}
