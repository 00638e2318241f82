//! Dictionary entity extractor.
//!
//! Scans a question left to right and at each position takes the longest
//! vocabulary term that starts there. Vocabulary usually comes from the names
//! of graph nodes, so every extracted entity is one the store can answer for.

use crate::typer::classify_term;
use medkg_core::prelude::*;
use std::collections::{HashMap, HashSet};

/// Terms shorter than this are too ambiguous to match.
const MIN_TERM_CHARS: usize = 2;

/// Greedy longest-match extractor over a typed vocabulary.
#[derive(Debug, Default, Clone)]
pub struct DictionaryEntityExtractor {
    terms: HashMap<String, EntityType>,
    max_chars: usize,
}

impl DictionaryEntityExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from typed names. The first type seen for a name wins.
    pub fn from_typed<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, EntityType)>,
        S: AsRef<str>,
    {
        let mut extractor = Self::new();
        for (name, entity_type) in entries {
            extractor.add(name.as_ref(), entity_type);
        }
        extractor
    }

    /// Build from bare terms, typing each with the rule-based typer.
    /// Terms the typer cannot classify are ignored.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut extractor = Self::new();
        for term in terms {
            if let Some(entity_type) = classify_term(term.as_ref()) {
                extractor.add(term.as_ref(), entity_type);
            }
        }
        extractor
    }

    /// Add a term. Returns false when it was too short or already present.
    pub fn add(&mut self, term: &str, entity_type: EntityType) -> bool {
        let term = term.trim();
        let chars = term.chars().count();
        if chars < MIN_TERM_CHARS || self.terms.contains_key(term) {
            return false;
        }
        self.terms.insert(term.to_string(), entity_type);
        self.max_chars = self.max_chars.max(chars);
        true
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Matches in text order, de-duplicated by lowercased name.
    pub fn find(&self, text: &str) -> Vec<Entity> {
        let chars: Vec<char> = text.chars().collect();
        let mut found = Vec::new();
        let mut seen = HashSet::new();

        let mut start = 0;
        while start < chars.len() {
            let longest = self.max_chars.min(chars.len() - start);
            let hit = (MIN_TERM_CHARS..=longest).rev().find_map(|len| {
                let candidate: String = chars[start..start + len].iter().collect();
                self.terms.get(&candidate).map(|t| (candidate, *t, len))
            });

            match hit {
                Some((name, entity_type, len)) => {
                    if seen.insert(name.to_lowercase()) {
                        found.push(Entity::new(name, entity_type));
                    }
                    start += len;
                }
                None => start += 1,
            }
        }
        found
    }
}

impl EntityExtractor for DictionaryEntityExtractor {
    fn extract(&self, text: &str) -> std::result::Result<Vec<RawEntity>, ExtractionFailure> {
        let entities = self.find(text);
        tracing::debug!(count = entities.len(), "dictionary entities extracted");
        Ok(entities
            .into_iter()
            .map(|e| RawEntity::new(e.name, e.entity_type.as_str()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> DictionaryEntityExtractor {
        DictionaryEntityExtractor::from_typed([
            ("高血压", EntityType::Disease),
            ("血压", EntityType::Check),
            ("头晕", EntityType::Symptom),
            ("感冒", EntityType::Disease),
            ("感冒灵颗粒", EntityType::Drug),
        ])
    }

    #[test]
    fn longest_match_wins() {
        let found = extractor().find("高血压会头晕吗");
        assert_eq!(
            found,
            vec![Entity::disease("高血压"), Entity::symptom("头晕")]
        );

        let found = extractor().find("感冒灵颗粒能治感冒吗");
        assert_eq!(
            found,
            vec![Entity::new("感冒灵颗粒", EntityType::Drug), Entity::disease("感冒")]
        );
    }

    #[test]
    fn repeated_mentions_are_reported_once() {
        let found = extractor().find("头晕，还是头晕");
        assert_eq!(found, vec![Entity::symptom("头晕")]);
    }

    #[test]
    fn case_insensitive_dedup_keeps_first_spelling() {
        let extractor = DictionaryEntityExtractor::from_typed([
            ("CT", EntityType::Check),
            ("ct", EntityType::Check),
        ]);
        let found = extractor.find("CT还是ct");
        assert_eq!(found, vec![Entity::new("CT", EntityType::Check)]);
    }

    #[test]
    fn untyped_terms_go_through_the_typer() {
        let extractor = DictionaryEntityExtractor::from_terms(["糖尿病", "胰岛素", "x"]);
        assert_eq!(extractor.len(), 2);
        let raw = extractor.extract("糖尿病要打胰岛素吗").unwrap();
        assert_eq!(
            raw,
            vec![RawEntity::new("糖尿病", "Disease"), RawEntity::new("胰岛素", "Drug")]
        );
    }

    #[test]
    fn first_type_for_a_name_wins() {
        let mut extractor = extractor();
        assert!(!extractor.add("感冒", EntityType::Symptom));
        assert!(!extractor.add("痛", EntityType::Symptom));
        assert_eq!(extractor.find("感冒"), vec![Entity::disease("感冒")]);
    }
}
