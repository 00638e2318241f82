//! Dispatcher behaviour across the transition table.

mod common;

use common::{FailingStore, RecordingStore};
use medkg_rag::dispatcher::{
    DEPARTMENT_ADVICE, FOOD_AVOID_ADVICE, FOOD_RECOMMEND_ADVICE, INTENT_UNDETERMINED, NO_SYMPTOM,
    QUERY_FAILED,
};
use medkg_rag::prelude::*;
use std::sync::Arc;

fn dispatcher_over(store: &Arc<RecordingStore>) -> Dispatcher {
    Dispatcher::standard(Arc::clone(store) as Arc<dyn GraphStore>).unwrap()
}

#[test]
fn symptom_lookup_is_labelled() {
    let store = Arc::new(RecordingStore::returning(["头晕", "乏力"]));
    let outcome = dispatcher_over(&store).dispatch(
        "高血压有什么症状",
        Intent::QuerySymptom,
        vec![Entity::disease("高血压")],
    );

    assert_eq!(outcome.context, "主要症状：头晕 、乏力");
    assert!(outcome.satisfied);
    assert_eq!(
        store.calls(),
        vec![(QueryShape::Traverse(Relation::HasSymptom), QueryParams::named("高血压"))]
    );
}

#[test]
fn symptom_search_recovers_from_lexicon_and_requires_every_symptom() {
    let store = Arc::new(RecordingStore::empty());
    let outcome =
        dispatcher_over(&store).dispatch("我头疼发烧", Intent::FindDiseaseBySymptom, Vec::new());

    assert_eq!(outcome.context, NOTHING_FOUND);
    assert!(outcome.satisfied);
    assert_eq!(
        outcome.entities,
        vec![Entity::symptom("头疼"), Entity::symptom("发烧"), Entity::symptom("疼")]
    );

    let calls = store.calls();
    assert_eq!(calls.len(), 1);
    let (shape, params) = &calls[0];
    assert_eq!(*shape, QueryShape::SymptomConjunction);
    assert_eq!(params.symptoms(), vec!["头疼", "发烧", "疼"]);
    // one HAS_SYMPTOM clause per symptom: a disease must match all of them
    assert_eq!(shape.to_cypher(params).matches("HAS_SYMPTOM").count(), 3);
}

#[test]
fn food_avoid_without_disease_gives_advice_without_querying() {
    let store = Arc::new(RecordingStore::returning(["辣椒"]));
    let outcome = dispatcher_over(&store).dispatch("有什么忌口", Intent::QueryFoodAvoid, Vec::new());

    assert_eq!(outcome.context, FOOD_AVOID_ADVICE);
    assert!(!outcome.satisfied);
    assert!(store.calls().is_empty());
}

#[test]
fn unknown_intent_ignores_entities() {
    let store = Arc::new(RecordingStore::returning(["x"]));
    let dispatcher = dispatcher_over(&store);
    for intent in [Intent::UnknownIntent, Intent::UnknownError] {
        let outcome = dispatcher.dispatch("高血压", intent, vec![Entity::disease("高血压")]);
        assert_eq!(outcome.context, INTENT_UNDETERMINED);
        assert!(!outcome.satisfied);
    }
    assert!(store.calls().is_empty());
}

#[test]
fn graph_failure_degrades_to_query_failed() {
    let dispatcher = Dispatcher::standard(Arc::new(FailingStore)).unwrap();
    let outcome = dispatcher.dispatch("感冒吃什么药", Intent::QueryDrug, vec![Entity::disease("感冒")]);

    assert_eq!(outcome.context, QUERY_FAILED);
    assert!(!outcome.satisfied);
}

#[test]
fn disease_intents_recover_from_lexicon() {
    let store = Arc::new(RecordingStore::returning(["阿司匹林"]));
    let outcome = dispatcher_over(&store).dispatch(
        "冠心病吃什么药",
        Intent::QueryDrug,
        vec![Entity::symptom("胸痛")],
    );

    assert_eq!(outcome.context, "推荐药物：阿司匹林");
    assert_eq!(
        outcome.entities,
        vec![Entity::symptom("胸痛"), Entity::disease("冠心病")]
    );
    assert_eq!(store.calls()[0].1, QueryParams::named("冠心病"));
}

#[test]
fn intent_specific_advisories_when_recovery_fails() {
    let store = Arc::new(RecordingStore::empty());
    let dispatcher = dispatcher_over(&store);
    let cases = [
        (Intent::FindDiseaseBySymptom, NO_SYMPTOM.to_string()),
        (Intent::QueryFoodAvoid, FOOD_AVOID_ADVICE.to_string()),
        (Intent::QueryFoodRecommend, FOOD_RECOMMEND_ADVICE.to_string()),
        (Intent::QueryDepartment, DEPARTMENT_ADVICE.to_string()),
        (
            Intent::QueryCureWay,
            "虽然识别到意图为'query_cure_way'，但未能提取到具体的疾病实体，建议明确指出疾病名称。"
                .to_string(),
        ),
    ];
    for (intent, expected) in cases {
        let outcome = dispatcher.dispatch("我不太舒服", intent, Vec::new());
        assert_eq!(outcome.context, expected, "{intent}");
        assert!(!outcome.satisfied);
    }
    assert!(store.calls().is_empty());
}

#[test]
fn generic_intents_never_consult_the_lexicon() {
    let store = Arc::new(RecordingStore::returning(["血压高"]));
    let outcome = dispatcher_over(&store).dispatch("高血压的病因", Intent::QueryCause, Vec::new());

    assert_eq!(
        outcome.context,
        "虽然识别到意图为'query_cause'，但未能提取到具体的医疗实体，建议提供更具体的信息。"
    );
    assert!(outcome.entities.is_empty());
    assert!(store.calls().is_empty());
}

#[test]
fn generic_intent_with_only_a_symptom_gets_the_entity_advisory() {
    let store = Arc::new(RecordingStore::returning(["血压高"]));
    let outcome = dispatcher_over(&store).dispatch(
        "头疼怎么预防",
        Intent::QueryPrevent,
        vec![Entity::symptom("头疼")],
    );

    assert_eq!(
        outcome.context,
        "虽然识别到意图为'query_prevent'，但未能提取到具体的医疗实体，建议提供更具体的信息。"
    );
    assert!(!outcome.satisfied);
    assert_eq!(outcome.entities, vec![Entity::symptom("头疼")]);
    assert!(store.calls().is_empty());
}

#[test]
fn blank_list_property_is_nothing_found() {
    let store = Arc::new(RecordingStore::returning([ResultValue::List(vec!["".into()])]));
    let outcome = dispatcher_over(&store).dispatch(
        "糖尿病怎么治",
        Intent::QueryCureWay,
        vec![Entity::disease("糖尿病")],
    );

    assert_eq!(outcome.context, NOTHING_FOUND);
    assert!(outcome.satisfied);
    assert_eq!(store.calls().len(), 1);
}

#[test]
fn present_entity_skips_recovery() {
    let store = Arc::new(RecordingStore::returning(["心内科"]));
    let outcome = dispatcher_over(&store).dispatch(
        "糖尿病和高血压挂什么科",
        Intent::QueryDepartment,
        vec![Entity::disease("高血压")],
    );

    assert_eq!(outcome.context, "建议挂号科室：心内科");
    assert_eq!(outcome.entities, vec![Entity::disease("高血压")]);
}

#[test]
fn property_lookup_returns_the_value() {
    let store = Arc::new(RecordingStore::returning([ResultValue::List(vec![
        "药物治疗".into(),
        "饮食治疗".into(),
    ])]));
    let outcome = dispatcher_over(&store).dispatch(
        "糖尿病怎么治",
        Intent::QueryCureWay,
        vec![Entity::disease("糖尿病")],
    );

    assert_eq!(outcome.context, "药物治疗、饮食治疗");
    assert_eq!(
        store.calls()[0].0,
        QueryShape::Property(DiseaseProperty::CureWay)
    );
}

#[test]
fn incomplete_registry_is_rejected_at_startup() {
    let mut registry = TemplateRegistry::empty();
    registry.insert(QueryTemplate::traverse(Intent::QueryDrug, Relation::RecommendsDrug));
    let result = Dispatcher::new(
        Arc::new(FailingStore),
        registry,
        Lexicon::builtin().unwrap(),
    );
    assert!(matches!(result, Err(ConfigError::MissingTemplate(_))));
}
