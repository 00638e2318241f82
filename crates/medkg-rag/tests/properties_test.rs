//! Properties that hold for every input.

mod common;

use common::{FailingStore, RecordingStore};
use medkg_rag::formatter::{label_for, VALUE_SEPARATOR};
use medkg_rag::prelude::*;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

const LIST_INTENTS: [Intent; 8] = [
    Intent::QuerySymptom,
    Intent::QueryDrug,
    Intent::QueryCheck,
    Intent::QueryFoodAvoid,
    Intent::QueryFoodRecommend,
    Intent::QueryDepartment,
    Intent::QueryComplication,
    Intent::FindDiseaseBySymptom,
];

fn value_set(intent: Intent, formatted: &str) -> BTreeSet<String> {
    let label = label_for(intent).unwrap_or_default();
    formatted
        .strip_prefix(label)
        .unwrap_or(formatted)
        .split(VALUE_SEPARATOR)
        .map(str::to_string)
        .collect()
}

fn row_strategy() -> impl Strategy<Value = ResultValue> {
    prop_oneof![
        "[头晕乏力 ]{0,2}".prop_map(ResultValue::Text),
        prop::collection::vec("[头晕乏力 ]{0,2}", 0..3).prop_map(ResultValue::List),
    ]
}

fn entity_strategy() -> impl Strategy<Value = Entity> {
    let names = prop::sample::select(vec!["高血压", "感冒", "头疼", "发烧", "阿司匹林", "心内科"]);
    let types = prop::sample::select(EntityType::ALL.to_vec());
    (names, types).prop_map(|(name, kind)| Entity::new(name, kind))
}

proptest! {
    #[test]
    fn formatter_output_set_is_permutation_invariant(
        values in prop::collection::vec("[头晕乏力咳嗽发烧]{0,3}", 0..8),
        intent_idx in 0..LIST_INTENTS.len(),
        seed in any::<u64>(),
    ) {
        let intent = LIST_INTENTS[intent_idx];
        let rows: Vec<ResultValue> = values.iter().map(|v| ResultValue::from(v.as_str())).collect();

        let mut shuffled = rows.clone();
        // deterministic rotation plus reversal stands in for a shuffle
        if !shuffled.is_empty() {
            let k = (seed as usize) % shuffled.len();
            shuffled.rotate_left(k);
            if seed % 2 == 0 {
                shuffled.reverse();
            }
        }

        let a = format_rows(intent, &rows);
        let b = format_rows(intent, &shuffled);
        prop_assert_eq!(value_set(intent, &a), value_set(intent, &b));
    }

    #[test]
    fn lexicon_scan_is_deterministic(text in "[我头疼痛晕发烧热咳嗽高血压感冒糖尿病]{0,12}") {
        let lexicon = Lexicon::builtin().unwrap();
        prop_assert_eq!(lexicon.extract_symptoms(&text), lexicon.extract_symptoms(&text));
        prop_assert_eq!(lexicon.extract_diseases(&text), lexicon.extract_diseases(&text));
        for entity in lexicon.extract_symptoms(&text) {
            prop_assert!(text.contains(entity.name.as_str()));
        }
    }

    #[test]
    fn context_is_never_empty(
        intent_idx in 0..Intent::ALL.len(),
        entities in prop::collection::vec(entity_strategy(), 0..4),
        text in "[我头疼发烧高血压吃什么药]{0,10}",
        rows in prop::collection::vec(row_strategy(), 0..4),
        fail in any::<bool>(),
    ) {
        let intent = Intent::ALL[intent_idx];
        let store: Arc<dyn GraphStore> = if fail {
            Arc::new(FailingStore)
        } else {
            Arc::new(RecordingStore::returning(rows))
        };
        let dispatcher = Dispatcher::standard(store).unwrap();

        let outcome = dispatcher.dispatch(&text, intent, entities);
        prop_assert!(!outcome.context.is_empty());
        if !intent.is_recognized() {
            prop_assert!(!outcome.satisfied);
        }
    }
}
