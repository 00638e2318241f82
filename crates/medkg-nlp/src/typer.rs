//! Rule-based typing of medical terms.
//!
//! Assigns an entity type to a bare term from characteristic substrings.
//! Rules are checked in a fixed order, Disease first, so a term
//! like 高血压 is a Disease even though 血压 is also a Check keyword.

use medkg_core::types::EntityType;

const DISEASE_KEYWORDS: &[&str] = &[
    "病", "症", "炎", "癌", "瘤", "血压", "糖尿", "痛风", "感冒", "发烧", "肺炎", "胃炎", "肝炎",
    "肾炎", "心脏病", "脑梗", "中风", "骨折", "钙化", "结石", "囊肿", "增生", "硬化", "萎缩",
    "狭窄", "梗阻",
];

const SYMPTOM_KEYWORDS: &[&str] = &[
    "疼", "痛", "酸", "胀", "麻", "痒", "热", "冷", "晕", "乏力", "恶心", "呕吐", "腹泻", "便秘",
    "咳嗽", "气短", "心慌", "失眠", "头晕", "头痛", "胸闷", "腹胀", "食欲不振", "体重下降",
];

const DRUG_KEYWORDS: &[&str] = &[
    "针", "片", "胶囊", "颗粒", "丸", "散", "膏", "液", "素", "林", "霉素", "阿司匹林", "布洛芬",
    "青霉素", "胰岛素", "玻尿酸", "肉毒素", "药", "剂", "制剂", "注射", "滴眼", "滴鼻", "口服",
    "外用",
];

const CHECK_KEYWORDS: &[&str] = &[
    "CT", "MRI", "X光", "B超", "彩超", "心电图", "脑电图", "肌电图", "血常规", "尿常规", "肝功",
    "肾功", "血糖", "血脂", "血压", "检查", "检验", "化验", "筛查", "监测", "测定", "分析",
];

const DEPARTMENT_KEYWORDS: &[&str] = &[
    "科", "内科", "外科", "儿科", "妇科", "骨科", "眼科", "耳鼻喉", "皮肤科", "神经科", "心内科",
    "消化科", "呼吸科", "肿瘤科", "急诊", "门诊", "病房", "诊室",
];

const FOOD_KEYWORDS: &[&str] = &[
    "食物", "食品", "饮食", "营养", "蛋白", "维生素", "钙", "铁", "锌", "水果", "蔬菜", "肉类",
    "海鲜", "豆类", "坚果", "奶制品", "主食", "米", "面", "肉", "鱼", "虾", "蟹", "奶", "蛋",
];

fn contains_any(term: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| term.contains(k))
}

/// Classify a term. Unmatched terms fall back on length: three or more
/// characters read as a Disease, two as a Symptom, shorter ones are dropped.
pub fn classify_term(term: &str) -> Option<EntityType> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }

    if contains_any(term, DISEASE_KEYWORDS) {
        return Some(EntityType::Disease);
    }
    if contains_any(term, SYMPTOM_KEYWORDS) {
        return Some(EntityType::Symptom);
    }
    if contains_any(term, DRUG_KEYWORDS) {
        return Some(EntityType::Drug);
    }
    if contains_any(term, CHECK_KEYWORDS) {
        return Some(EntityType::Check);
    }
    if contains_any(term, DEPARTMENT_KEYWORDS) {
        return Some(EntityType::Department);
    }
    if contains_any(term, FOOD_KEYWORDS) {
        return Some(EntityType::Food);
    }

    match term.chars().count() {
        n if n >= 3 => Some(EntityType::Disease),
        2 => Some(EntityType::Symptom),
        _ => None,
    }
}
