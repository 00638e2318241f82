//! Snapshot persistence tests.

use medkg_core::prelude::*;
use medkg_graph::{import_jsonl, load_snapshot, load_store, save_snapshot, MemoryGraphStore};
use std::io::Cursor;
use tempfile::TempDir;

const RECORDS: &str = r#"{"name": "高血压", "desc": "以体循环动脉血压增高为主要特征", "cure_way": ["药物治疗", "康复治疗"], "symptom": ["头晕", "头疼"], "check": ["血压测量"], "cure_department": ["心内科"]}
{"name": "糖尿病", "symptom": ["乏力"], "not_eat": ["白糖"], "do_eat": ["苦瓜"]}
"#;

fn populated() -> MemoryGraphStore {
    let mut store = MemoryGraphStore::new();
    import_jsonl(&mut store, Cursor::new(RECORDS)).unwrap();
    store
}

#[test]
fn snapshot_preserves_nodes_edges_and_properties() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("graph.json");
    let store = populated();

    save_snapshot(&store, &path, &["diseases.jsonl".to_string()]).unwrap();
    let restored = load_store(&path).unwrap();

    assert_eq!(restored.node_count(), store.node_count());
    assert_eq!(restored.edge_count(), store.edge_count());

    let cure = restored
        .run(&QueryShape::Property(DiseaseProperty::CureWay), &QueryParams::named("高血压"))
        .unwrap();
    assert_eq!(
        cure,
        vec![ResultValue::List(vec!["药物治疗".into(), "康复治疗".into()])]
    );

    let symptoms = restored
        .run(&QueryShape::Traverse(Relation::HasSymptom), &QueryParams::named("高血压"))
        .unwrap();
    assert_eq!(symptoms, vec![ResultValue::from("头晕"), ResultValue::from("头疼")]);
}

#[test]
fn snapshot_metadata_records_sources() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.json");
    let store = populated();

    save_snapshot(&store, &path, &["a.jsonl".to_string(), "b.jsonl".to_string()]).unwrap();
    let snapshot = load_snapshot(&path).unwrap();

    assert_eq!(snapshot.metadata.node_count, store.node_count());
    assert_eq!(snapshot.metadata.edge_count, store.edge_count());
    assert_eq!(snapshot.metadata.sources, vec!["a.jsonl", "b.jsonl"]);
}

#[test]
fn missing_snapshot_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = load_store(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, MedkgError::Io(_)));
}

#[test]
fn corrupt_snapshot_is_a_serialization_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.json");
    std::fs::write(&path, "{ not a snapshot").unwrap();
    assert!(matches!(load_store(&path), Err(MedkgError::Serialization(_))));
}
