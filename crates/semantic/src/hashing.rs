use async_trait::async_trait;
use fxhash::hash64;

use crate::normalize::l2_normalize_in_place;
use crate::{EmbeddingProvider, SemanticConfig, SemanticError};

/// Weight of a boundary-marked character trigram relative to a whole word.
const TRIGRAM_WEIGHT: f32 = 0.35;

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "in", "is", "it", "of", "on",
    "or", "the", "to", "was", "when", "with",
];

/// Deterministic feature-hashing embedder.
///
/// Words and their character trigrams are hashed into signed buckets, so texts
/// sharing vocabulary land close together under cosine similarity. No model
/// assets are needed and the same text always yields the same vector.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
    model_name: String,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
            model_name: SemanticConfig::default().model_name,
        }
    }

    pub fn from_config(cfg: &SemanticConfig) -> Self {
        Self {
            dimension: cfg.dimension.max(1),
            model_name: cfg.model_name.clone(),
        }
    }

    /// Synchronous core of [`EmbeddingProvider::embed`].
    pub fn embed_text(&self, text: &str) -> Result<Vec<f32>, SemanticError> {
        let mut v = vec![0f32; self.dimension];
        let mut features = 0usize;

        for word in words(text) {
            self.accumulate(&mut v, 0, &word, 1.0);
            features += 1;
            let marked: Vec<char> = std::iter::once('#')
                .chain(word.chars())
                .chain(std::iter::once('#'))
                .collect();
            for tri in marked.windows(3) {
                self.accumulate(&mut v, 1, &tri.iter().collect::<String>(), TRIGRAM_WEIGHT);
            }
        }

        // Punctuation-only text still carries a signal through its raw trigrams.
        if features == 0 {
            let chars: Vec<char> = text.trim().chars().collect();
            if chars.is_empty() {
                return Err(SemanticError::MalformedInput(
                    "text has no embeddable content".into(),
                ));
            }
            if chars.len() < 3 {
                self.accumulate(&mut v, 2, &chars.iter().collect::<String>(), 1.0);
            }
            for tri in chars.windows(3) {
                self.accumulate(&mut v, 2, &tri.iter().collect::<String>(), 1.0);
            }
        }

        l2_normalize_in_place(&mut v);
        if v.iter().all(|x| *x == 0.0) {
            // Every feature cancelled out against a colliding opposite-sign bucket.
            return Err(SemanticError::Inference(
                "hashed features cancelled to a zero vector".into(),
            ));
        }
        Ok(v)
    }

    fn accumulate(&self, v: &mut [f32], namespace: u8, feature: &str, weight: f32) {
        let h = hash64(&(namespace, feature));
        let bucket = (h % self.dimension as u64) as usize;
        let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
        v[bucket] += sign * weight;
    }
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .filter(|w| !STOP_WORDS.contains(&w.as_str()))
}

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.dimension)
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, SemanticError> {
        self.embed_text(text)
    }
}
