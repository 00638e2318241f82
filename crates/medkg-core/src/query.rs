//! Query shapes: the closed set of parameterized graph queries.
//!
//! A shape names labels, relation types and projected properties, all of
//! which are fixed vocabulary. Entity-derived strings only ever travel as
//! parameter values in [`QueryParams`], never inside the query body.

use crate::error::GraphError;
use crate::types::EntityType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Parameter bound to the primary entity of single-hop shapes.
pub const NAME_PARAM: &str = "name";

/// Parameter key for the `index`-th symptom of a conjunctive match.
pub fn symptom_param(index: usize) -> String {
    format!("symptom_{index}")
}

/// Relation types stored in the graph. Every relation starts at a Disease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    HasSymptom,
    RecommendsDrug,
    NeedsCheck,
    AvoidsEat,
    RecommendsEat,
    BelongsToDept,
    HasComplication,
}

impl Relation {
    pub const ALL: [Relation; 7] = [
        Relation::HasSymptom,
        Relation::RecommendsDrug,
        Relation::NeedsCheck,
        Relation::AvoidsEat,
        Relation::RecommendsEat,
        Relation::BelongsToDept,
        Relation::HasComplication,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::HasSymptom => "HAS_SYMPTOM",
            Relation::RecommendsDrug => "RECOMMENDS_DRUG",
            Relation::NeedsCheck => "NEEDS_CHECK",
            Relation::AvoidsEat => "AVOIDS_EAT",
            Relation::RecommendsEat => "RECOMMENDS_EAT",
            Relation::BelongsToDept => "BELONGS_TO_DEPT",
            Relation::HasComplication => "HAS_COMPLICATION",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.as_str() == label)
    }

    /// Label of the node at the far end of the relation.
    pub fn target(&self) -> EntityType {
        match self {
            Relation::HasSymptom => EntityType::Symptom,
            Relation::RecommendsDrug => EntityType::Drug,
            Relation::NeedsCheck => EntityType::Check,
            Relation::AvoidsEat | Relation::RecommendsEat => EntityType::Food,
            Relation::BelongsToDept => EntityType::Department,
            Relation::HasComplication => EntityType::Disease,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-valued properties stored on Disease nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiseaseProperty {
    Desc,
    Cause,
    Prevent,
    CureWay,
}

impl DiseaseProperty {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiseaseProperty::Desc => "desc",
            DiseaseProperty::Cause => "cause",
            DiseaseProperty::Prevent => "prevent",
            DiseaseProperty::CureWay => "cure_way",
        }
    }
}

/// A parameterized graph query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryShape {
    /// `(d:Disease {name: $name})-[:REL]->(t:Target)`, projecting `t.name`.
    Traverse(Relation),
    /// `(d:Disease {name: $name})`, projecting one property.
    Property(DiseaseProperty),
    /// Diseases linked by HAS_SYMPTOM to every `$symptom_i`, projecting
    /// distinct disease names. A disease must match all symptoms.
    SymptomConjunction,
}

impl QueryShape {
    /// Check that every parameter the shape needs is bound.
    pub fn check_params(&self, params: &QueryParams) -> Result<(), GraphError> {
        match self {
            QueryShape::Traverse(_) | QueryShape::Property(_) => {
                if params.get(NAME_PARAM).is_none() {
                    return Err(GraphError::MalformedQuery(NAME_PARAM.to_string()));
                }
            }
            QueryShape::SymptomConjunction => {
                if params.symptoms().is_empty() {
                    return Err(GraphError::MalformedQuery(symptom_param(0)));
                }
            }
        }
        Ok(())
    }

    /// Render the shape as a Cypher statement for a given parameter set.
    ///
    /// Only the number of bound symptoms influences the text; values stay in
    /// the parameter map.
    pub fn to_cypher(&self, params: &QueryParams) -> String {
        match self {
            QueryShape::Traverse(relation) => format!(
                "MATCH (d:Disease {{name: ${NAME_PARAM}}})-[:{}]->(t:{}) RETURN t.name AS result",
                relation.as_str(),
                relation.target().as_str()
            ),
            QueryShape::Property(property) => format!(
                "MATCH (d:Disease {{name: ${NAME_PARAM}}}) RETURN d.{} AS result",
                property.as_str()
            ),
            QueryShape::SymptomConjunction => {
                let clauses: Vec<String> = (0..params.symptoms().len())
                    .map(|i| {
                        format!(
                            "(d:Disease)-[:{}]->(:Symptom {{name: ${}}})",
                            Relation::HasSymptom.as_str(),
                            symptom_param(i)
                        )
                    })
                    .collect();
                format!("MATCH {} RETURN DISTINCT d.name AS result", clauses.join(", "))
            }
        }
    }
}

/// Named string parameters for a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters for a single-hop shape.
    pub fn named(name: impl Into<String>) -> Self {
        let mut params = Self::new();
        params.insert(NAME_PARAM, name);
        params
    }

    /// Parameters for a conjunctive symptom match.
    pub fn symptoms_of<I, S>(symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut params = Self::new();
        for (i, symptom) in symptoms.into_iter().enumerate() {
            params.insert(symptom_param(i), symptom);
        }
        params
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Bound symptom values, `symptom_0` upward until the first gap.
    pub fn symptoms(&self) -> Vec<&str> {
        (0..)
            .map_while(|i| self.get(&symptom_param(i)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traverse_renders_relation_and_target() {
        let cypher = QueryShape::Traverse(Relation::HasSymptom).to_cypher(&QueryParams::named("x"));
        assert_eq!(
            cypher,
            "MATCH (d:Disease {name: $name})-[:HAS_SYMPTOM]->(t:Symptom) RETURN t.name AS result"
        );
    }

    #[test]
    fn conjunction_has_one_clause_per_symptom() {
        let params = QueryParams::symptoms_of(["头疼", "发烧"]);
        let cypher = QueryShape::SymptomConjunction.to_cypher(&params);
        assert_eq!(cypher.matches("HAS_SYMPTOM").count(), 2);
        assert!(cypher.contains("$symptom_0"));
        assert!(cypher.contains("$symptom_1"));
        assert!(cypher.contains("RETURN DISTINCT d.name"));
    }

    #[test]
    fn entity_values_never_reach_the_statement() {
        let params = QueryParams::named("x'}) DETACH DELETE d //");
        let cypher = QueryShape::Property(DiseaseProperty::Desc).to_cypher(&params);
        assert!(!cypher.contains("DELETE"));
    }

    #[test]
    fn missing_parameters_are_rejected() {
        let empty = QueryParams::new();
        assert_eq!(
            QueryShape::Traverse(Relation::NeedsCheck).check_params(&empty),
            Err(GraphError::MalformedQuery("name".into()))
        );
        assert!(QueryShape::SymptomConjunction.check_params(&empty).is_err());
        assert!(QueryShape::SymptomConjunction
            .check_params(&QueryParams::symptoms_of(["咳嗽"]))
            .is_ok());
    }

    #[test]
    fn complication_targets_diseases() {
        assert_eq!(Relation::HasComplication.target(), EntityType::Disease);
        assert_eq!(Relation::from_label("AVOIDS_EAT"), Some(Relation::AvoidsEat));
    }
}
