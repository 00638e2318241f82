//! Snapshot persistence: save/load the in-memory graph as JSON.

use crate::memory::MemoryGraphStore;
use medkg_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Serializable snapshot of the knowledge graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<SerializedNode>,
    pub edges: Vec<SerializedEdge>,
    pub metadata: SnapshotMetadata,
}

/// Serializable node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedNode {
    pub label: EntityType,
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, ResultValue>,
}

/// Serializable relation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedEdge {
    pub from_label: EntityType,
    pub from: String,
    pub relation: Relation,
    pub to_label: EntityType,
    pub to: String,
}

/// Snapshot metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub node_count: usize,
    pub edge_count: usize,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl GraphSnapshot {
    /// Capture the current state of a store.
    pub fn capture(store: &MemoryGraphStore, sources: &[String]) -> Self {
        let nodes: Vec<SerializedNode> = store
            .nodes()
            .map(|n| SerializedNode {
                label: n.label,
                name: n.name.clone(),
                properties: n.properties.clone(),
            })
            .collect();

        let edges: Vec<SerializedEdge> = store
            .edges()
            .map(|(from, relation, to)| SerializedEdge {
                from_label: from.label,
                from: from.name.clone(),
                relation,
                to_label: to.label,
                to: to.name.clone(),
            })
            .collect();

        Self {
            metadata: SnapshotMetadata {
                node_count: nodes.len(),
                edge_count: edges.len(),
                sources: sources.to_vec(),
            },
            nodes,
            edges,
        }
    }

    /// Rebuild a store from this snapshot.
    pub fn restore(&self) -> MemoryGraphStore {
        let mut store = MemoryGraphStore::new();
        for node in &self.nodes {
            let idx = store.merge_node(node.label, &node.name);
            for (key, value) in &node.properties {
                store.set_property(idx, key.clone(), value.clone());
            }
        }
        for edge in &self.edges {
            let from = store.merge_node(edge.from_label, &edge.from);
            let to = store.merge_node(edge.to_label, &edge.to);
            store.merge_edge(from, edge.relation, to);
        }
        store
    }
}

/// Save a store to a JSON file, creating parent directories as needed.
pub fn save_snapshot(store: &MemoryGraphStore, path: &Path, sources: &[String]) -> Result<()> {
    let snapshot = GraphSnapshot::capture(store, sources);
    let json = serde_json::to_string_pretty(&snapshot)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), nodes = snapshot.metadata.node_count, "snapshot saved");
    Ok(())
}

/// Load a snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<GraphSnapshot> {
    let json = std::fs::read_to_string(path)?;
    let snapshot: GraphSnapshot = serde_json::from_str(&json)?;
    Ok(snapshot)
}

/// Load a snapshot file straight into a store.
pub fn load_store(path: &Path) -> Result<MemoryGraphStore> {
    Ok(load_snapshot(path)?.restore())
}
