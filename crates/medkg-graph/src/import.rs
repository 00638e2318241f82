//! Dataset importer: loads JSON-lines disease records into a graph store.
//!
//! Each line is one disease object. Scalar fields become properties of the
//! Disease node; known list fields become relations to Symptom, Drug, Check,
//! Food, Department and complication Disease nodes. Malformed lines and
//! records without a name are logged and skipped, never fatal.

use crate::memory::MemoryGraphStore;
use medkg_core::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Record fields that describe relations rather than properties.
pub const RELATION_FIELDS: [(&str, Relation); 9] = [
    ("symptom", Relation::HasSymptom),
    ("acompany", Relation::HasComplication),
    ("common_drug", Relation::RecommendsDrug),
    ("recommand_drug", Relation::RecommendsDrug),
    ("check", Relation::NeedsCheck),
    ("cure_department", Relation::BelongsToDept),
    ("do_eat", Relation::RecommendsEat),
    ("recommand_eat", Relation::RecommendsEat),
    ("not_eat", Relation::AvoidsEat),
];

/// Summary of one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Records imported.
    pub records: usize,
    /// Lines skipped (malformed JSON or missing name).
    pub skipped: usize,
    /// Nodes in the store after the import.
    pub nodes: usize,
    /// Relations in the store after the import.
    pub edges: usize,
}

/// Why a record was not imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    InvalidJson(String),
    NotAnObject,
    MissingName,
}

/// Import a JSON-lines file.
pub fn import_file(store: &mut MemoryGraphStore, path: &Path) -> Result<ImportReport> {
    let file = File::open(path)?;
    tracing::info!(path = %path.display(), "importing disease records");
    import_jsonl(store, BufReader::new(file))
}

/// Import JSON-lines from any reader. Blank lines are ignored.
pub fn import_jsonl<R: BufRead>(store: &mut MemoryGraphStore, reader: R) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match import_line(store, line) {
            Ok(name) => {
                tracing::debug!(line = line_no + 1, disease = %name, "record imported");
                report.records += 1;
            }
            Err(reason) => {
                tracing::warn!(line = line_no + 1, ?reason, "record skipped");
                report.skipped += 1;
            }
        }
    }

    report.nodes = store.node_count();
    report.edges = store.edge_count();
    tracing::info!(
        records = report.records,
        skipped = report.skipped,
        nodes = report.nodes,
        edges = report.edges,
        "import finished"
    );
    Ok(report)
}

fn import_line(store: &mut MemoryGraphStore, line: &str) -> std::result::Result<String, SkipReason> {
    let value: Value =
        serde_json::from_str(line).map_err(|e| SkipReason::InvalidJson(e.to_string()))?;
    let Value::Object(record) = value else {
        return Err(SkipReason::NotAnObject);
    };
    import_record(store, &record)
}

/// Import one disease record. Returns the disease name.
pub fn import_record(
    store: &mut MemoryGraphStore,
    record: &Map<String, Value>,
) -> std::result::Result<String, SkipReason> {
    let name = match record.get("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => name.trim().to_string(),
        _ => return Err(SkipReason::MissingName),
    };

    let disease = store.merge_node(EntityType::Disease, &name);

    for (key, value) in record {
        if key == "name" {
            continue;
        }

        if let Some(relation) = relation_for(key) {
            for target in string_items(value) {
                store.relate(&name, relation, &target);
            }
            continue;
        }

        if let Some(property) = property_value(value) {
            store.set_property(disease, key.clone(), property);
        }
    }

    Ok(name)
}

fn relation_for(field: &str) -> Option<Relation> {
    RELATION_FIELDS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, relation)| *relation)
}

/// Non-empty string items of an array; anything else yields nothing.
fn string_items(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Strings and numbers become text properties, arrays of strings become list
/// properties. Objects, booleans and nulls are not stored.
fn property_value(value: &Value) -> Option<ResultValue> {
    match value {
        Value::String(s) => Some(ResultValue::Text(s.clone())),
        Value::Number(n) => Some(ResultValue::Text(n.to_string())),
        Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_string) => {
            Some(ResultValue::List(string_items(value)))
        }
        _ => None,
    }
}
