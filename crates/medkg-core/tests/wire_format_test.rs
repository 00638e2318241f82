//! JSON shapes exchanged with extractors, stores and callers.

use medkg_core::prelude::*;
use serde_json::json;

#[test]
fn entities_use_name_and_type_keys() {
    let value = serde_json::to_value(Entity::disease("高血压")).unwrap();
    assert_eq!(value, json!({"name": "高血压", "type": "Disease"}));
}

#[test]
fn raw_entities_accept_any_type_label() {
    let raw: Vec<RawEntity> = serde_json::from_value(json!([
        {"name": "头疼", "type": "Symptom"},
        {"name": "北京", "type": "Location"}
    ]))
    .unwrap();
    assert_eq!(raw[1], RawEntity::new("北京", "Location"));
}

#[test]
fn intents_serialize_as_wire_labels() {
    for intent in Intent::ALL {
        let value = serde_json::to_value(intent).unwrap();
        assert_eq!(value, json!(intent.as_str()));
        assert_eq!(serde_json::from_value::<Intent>(value).unwrap(), intent);
    }
}

#[test]
fn result_values_are_untagged() {
    let rows: Vec<ResultValue> = serde_json::from_value(json!(["头晕", ["药物治疗", "支持性治疗"]])).unwrap();
    assert_eq!(rows[0], ResultValue::from("头晕"));
    assert_eq!(rows[1].render("、"), "药物治疗、支持性治疗");
    assert!(ResultValue::List(Vec::new()).is_empty());
}

#[test]
fn unknown_entity_type_is_rejected_when_typed() {
    let result = serde_json::from_value::<Entity>(json!({"name": "北京", "type": "Location"}));
    assert!(result.is_err());
}

#[test]
fn outcome_marks_advisories_unsatisfied() {
    let outcome = RetrievalOutcome::advisory("请提供疾病名称", Vec::new());
    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["satisfied"], json!(false));
    assert!(RetrievalOutcome::lookup("主要症状：头晕", vec![Entity::disease("高血压")]).satisfied);
}
