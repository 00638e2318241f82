//! Character n-gram embedder.
//!
//! Chinese questions have no word boundaries, so the embedder works on
//! characters: every alphanumeric character and every adjacent pair of them
//! is hashed into a fixed-dimension space (the hashing trick). Punctuation
//! and whitespace break pairs. Not a semantic model, but short paraphrases
//! of the same question share most of their bigrams.

use crate::embedder::{Embedder, EmbeddingError, EmbeddingResult};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hash-based unigram + bigram embedder.
///
/// # Example
///
/// ```rust
/// use medkg_nlp::{Embedder, NgramEmbedder};
///
/// let embedder = NgramEmbedder::new(256);
/// let vec = embedder.embed("高血压有什么症状").unwrap();
/// assert_eq!(vec.len(), 256);
/// ```
pub struct NgramEmbedder {
    dimension: usize,
    num_hashes: usize,
}

impl NgramEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
            num_hashes: 2,
        }
    }

    /// Unigram and bigram features of the text, lowercased.
    fn features(&self, text: &str) -> Vec<String> {
        let mut features = Vec::new();
        for run in text.split(|c: char| !c.is_alphanumeric()) {
            let chars: Vec<char> = run.chars().flat_map(char::to_lowercase).collect();
            features.extend(chars.iter().map(|c| c.to_string()));
            features.extend(chars.windows(2).map(|w| w.iter().collect::<String>()));
        }
        features
    }

    fn hash_with_seed(&self, feature: &str, seed: u64) -> usize {
        let mut hasher = DefaultHasher::new();
        seed.hash(&mut hasher);
        feature.hash(&mut hasher);
        (hasher.finish() as usize) % self.dimension
    }

    fn sign_hash(&self, feature: &str, seed: u64) -> f32 {
        let mut hasher = DefaultHasher::new();
        (seed + 1000).hash(&mut hasher);
        feature.hash(&mut hasher);
        if hasher.finish() % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    }
}

impl Default for NgramEmbedder {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl Embedder for NgramEmbedder {
    fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::InvalidInput("Empty text".to_string()));
        }

        let features = self.features(text);
        let mut vector = vec![0.0f32; self.dimension];
        for feature in &features {
            for seed in 0..self.num_hashes as u64 {
                vector[self.hash_with_seed(feature, seed)] += self.sign_hash(feature, seed);
            }
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "char-ngram-hash"
    }
}
