//! Entity/intent adapter: turns raw extractor and classifier output into
//! domain types. Never fails: anything unrecognized degrades.

use medkg_core::prelude::*;

/// Map a classifier label onto the closed intent set.
pub fn adapt_intent(raw: &str) -> Intent {
    match Intent::from_label(raw.trim()) {
        Some(intent) => intent,
        None => {
            tracing::warn!(label = raw, "unrecognized intent label");
            Intent::UnknownIntent
        }
    }
}

/// Keep entities with a known type and a non-blank name, in order.
pub fn adapt_entities(raw: Vec<RawEntity>) -> Vec<Entity> {
    raw.into_iter()
        .filter_map(|entity| {
            let name = entity.name.trim();
            match EntityType::from_label(entity.entity_type.trim()) {
                Some(entity_type) if !name.is_empty() => Some(Entity::new(name, entity_type)),
                _ => {
                    tracing::debug!(name = %entity.name, kind = %entity.entity_type, "entity dropped");
                    None
                }
            }
        })
        .collect()
}

/// Adapt a classifier label and an extractor result together.
pub fn adapt(raw_intent: &str, raw_entities: Vec<RawEntity>) -> (Intent, Vec<Entity>) {
    (adapt_intent(raw_intent), adapt_entities(raw_entities))
}
