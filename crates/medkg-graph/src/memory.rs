//! In-memory implementation of the GraphStore trait using petgraph.
//!
//! Nodes are unique per (label, name) and relations unique per
//! (from, relation, to), the same MERGE semantics the importer relies on.
//! A HashMap index gives O(1) node lookup by label and name.

use medkg_core::prelude::*;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeMap, HashMap};

/// A node in the medical knowledge graph.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub label: EntityType,
    pub name: String,
    pub properties: BTreeMap<String, ResultValue>,
}

/// Petgraph-backed graph store.
#[derive(Debug, Default)]
pub struct MemoryGraphStore {
    graph: DiGraph<NodeData, Relation>,
    index: HashMap<(EntityType, String), NodeIndex>,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node with this label and name, creating it if needed.
    pub fn merge_node(&mut self, label: EntityType, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(&(label, name.to_string())) {
            return idx;
        }
        let idx = self.graph.add_node(NodeData {
            label,
            name: name.to_string(),
            properties: BTreeMap::new(),
        });
        self.index.insert((label, name.to_string()), idx);
        idx
    }

    /// Add a relation unless an identical one already exists.
    /// Returns true when a new edge was created.
    pub fn merge_edge(&mut self, from: NodeIndex, relation: Relation, to: NodeIndex) -> bool {
        let exists = self
            .graph
            .edges_connecting(from, to)
            .any(|edge| *edge.weight() == relation);
        if exists {
            return false;
        }
        self.graph.add_edge(from, to, relation);
        true
    }

    /// Merge `(Disease {name: disease})-[relation]->(Target {name: target})`.
    pub fn relate(&mut self, disease: &str, relation: Relation, target: &str) -> bool {
        let from = self.merge_node(EntityType::Disease, disease);
        let to = self.merge_node(relation.target(), target);
        self.merge_edge(from, relation, to)
    }

    pub fn set_property(&mut self, node: NodeIndex, key: impl Into<String>, value: ResultValue) {
        if let Some(data) = self.graph.node_weight_mut(node) {
            data.properties.insert(key.into(), value);
        }
    }

    pub fn find(&self, label: EntityType, name: &str) -> Option<NodeIndex> {
        self.index.get(&(label, name.to_string())).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&NodeData> {
        self.graph.node_weight(idx)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// All relations in insertion order as (from, relation, to).
    pub fn edges(&self) -> impl Iterator<Item = (&NodeData, Relation, &NodeData)> {
        self.graph.edge_references().map(move |edge| {
            (
                &self.graph[edge.source()],
                *edge.weight(),
                &self.graph[edge.target()],
            )
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node counts per label.
    pub fn count_by_label(&self) -> BTreeMap<EntityType, usize> {
        let mut counts = BTreeMap::new();
        for node in self.nodes() {
            *counts.entry(node.label).or_insert(0) += 1;
        }
        counts
    }

    /// Names of nodes with a given label, in insertion order.
    pub fn names_with_label(&self, label: EntityType) -> Vec<&str> {
        self.nodes()
            .filter(|n| n.label == label)
            .map(|n| n.name.as_str())
            .collect()
    }

    /// Targets of `relation` from a disease, in the order they were added.
    fn traverse(&self, disease: &str, relation: Relation) -> Vec<ResultValue> {
        let Some(from) = self.find(EntityType::Disease, disease) else {
            return Vec::new();
        };

        let mut edges: Vec<_> = self
            .graph
            .edges_directed(from, Direction::Outgoing)
            .filter(|edge| *edge.weight() == relation)
            .filter(|edge| self.graph[edge.target()].label == relation.target())
            .collect();
        // petgraph walks outgoing edges newest first
        edges.sort_by_key(|edge| edge.id());

        edges
            .into_iter()
            .map(|edge| ResultValue::Text(self.graph[edge.target()].name.clone()))
            .collect()
    }

    fn property(&self, disease: &str, property: DiseaseProperty) -> Vec<ResultValue> {
        self.find(EntityType::Disease, disease)
            .and_then(|idx| self.graph[idx].properties.get(property.as_str()))
            .cloned()
            .into_iter()
            .collect()
    }

    fn has_symptom(&self, disease: NodeIndex, symptom: &str) -> bool {
        self.graph
            .edges_directed(disease, Direction::Outgoing)
            .any(|edge| {
                let target = &self.graph[edge.target()];
                *edge.weight() == Relation::HasSymptom
                    && target.label == EntityType::Symptom
                    && target.name == symptom
            })
    }

    /// Diseases that exhibit every listed symptom.
    fn symptom_conjunction(&self, symptoms: &[&str]) -> Vec<ResultValue> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph[idx].label == EntityType::Disease)
            .filter(|&idx| symptoms.iter().all(|s| self.has_symptom(idx, s)))
            .map(|idx| ResultValue::Text(self.graph[idx].name.clone()))
            .collect()
    }
}

impl GraphStore for MemoryGraphStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn run(&self, shape: &QueryShape, params: &QueryParams) -> std::result::Result<Vec<ResultValue>, GraphError> {
        shape.check_params(params)?;
        let name = params.get(NAME_PARAM).unwrap_or_default();

        let rows = match shape {
            QueryShape::Traverse(relation) => self.traverse(name, *relation),
            QueryShape::Property(property) => self.property(name, *property),
            QueryShape::SymptomConjunction => self.symptom_conjunction(&params.symptoms()),
        };

        tracing::debug!(store = "memory", ?shape, rows = rows.len(), "query executed");
        Ok(rows)
    }
}
