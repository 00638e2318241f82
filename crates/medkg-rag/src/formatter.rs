//! Result formatter: raw graph rows → one labelled context string.

use medkg_core::prelude::*;
use std::collections::HashSet;

/// Returned when no usable row survives filtering.
pub const NOTHING_FOUND: &str = "在知识图谱中未找到相关信息。";

/// Separator between values of list intents.
pub const VALUE_SEPARATOR: &str = " 、";

/// Separator inside a list-valued row, e.g. treatment methods.
pub const LIST_SEPARATOR: &str = "、";

/// Label prefix for intents whose rows form a list of names.
pub fn label_for(intent: Intent) -> Option<&'static str> {
    match intent {
        Intent::QuerySymptom => Some("主要症状："),
        Intent::QueryDrug => Some("推荐药物："),
        Intent::QueryCheck => Some("建议检查："),
        Intent::QueryFoodAvoid => Some("忌食："),
        Intent::QueryFoodRecommend => Some("推荐食物："),
        Intent::QueryDepartment => Some("建议挂号科室："),
        Intent::QueryComplication => Some("并发症："),
        Intent::FindDiseaseBySymptom => Some("可能的疾病："),
        _ => None,
    }
}

/// Strip blank items from list rows. `None` when nothing usable remains.
fn clean_row(row: &ResultValue) -> Option<ResultValue> {
    let cleaned = match row {
        ResultValue::Text(s) => ResultValue::Text(s.trim().to_string()),
        ResultValue::List(items) => ResultValue::List(
            items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        ),
    };
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Drop empty rows and repeats, keeping first occurrences in order.
fn distinct_rows(rows: &[ResultValue]) -> Vec<ResultValue> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter_map(clean_row)
        .filter(|row| seen.insert(row.clone()))
        .collect()
}

/// Render rows for an intent. Never returns an empty string.
pub fn format(intent: Intent, rows: &[ResultValue]) -> String {
    let rows = distinct_rows(rows);
    let Some(first) = rows.first() else {
        return NOTHING_FOUND.to_string();
    };

    let rendered = match intent {
        Intent::QueryDesc | Intent::QueryCause | Intent::QueryPrevent | Intent::QueryCureWay => {
            first.render(LIST_SEPARATOR)
        }
        _ => {
            let values: Vec<String> = rows.iter().map(|row| row.render(LIST_SEPARATOR)).collect();
            let joined = values.join(VALUE_SEPARATOR);
            match label_for(intent) {
                Some(label) => format!("{label}{joined}"),
                None => joined,
            }
        }
    };

    if rendered.trim().is_empty() {
        NOTHING_FOUND.to_string()
    } else {
        rendered
    }
}
