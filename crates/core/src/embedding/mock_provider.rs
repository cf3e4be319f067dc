use async_trait::async_trait;
use brainprint_shared::{EmbeddingProvider, EngineResult, WordEmbedding};

use crate::vector;

/// Deterministic embedding provider for tests: derives a pseudo-vector from
/// a word's characters via a seeded sinusoid. Two calls with the same word
/// always produce the same vector; no I/O, no randomness.
pub struct MockEmbeddingProvider {
    dimension: usize,
}

impl MockEmbeddingProvider {
    pub fn new(dimension: usize) -> Self {
        Self { dimension: dimension.max(1) }
    }

    fn derive(&self, word: &str) -> Vec<f64> {
        let lower = word.to_lowercase();
        let seed: u64 = lower
            .bytes()
            .enumerate()
            .map(|(i, b)| (b as u64 + 1).wrapping_mul(31u64.wrapping_pow(i as u32 % 8)))
            .fold(0u64, |acc, x| acc.wrapping_add(x));

        let mut v = Vec::with_capacity(self.dimension);
        for i in 0..self.dimension {
            let phase = (seed as f64) * 0.000_001 + (i as f64) * 0.37;
            v.push(phase.sin());
        }
        vector::normalize(&v)
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn get(&self, word: &str, language: &str) -> EngineResult<Option<WordEmbedding>> {
        if word.is_empty() {
            return Ok(None);
        }
        Ok(Some(WordEmbedding {
            word: word.to_lowercase(),
            language: language.to_string(),
            vector: self.derive(word),
            frequency: Some(mock_frequency(word)),
        }))
    }
}

/// A deterministic stand-in for corpus frequency, used by rarity's base
/// computation in tests/demos: shorter, more common-looking words get a
/// higher synthetic frequency.
fn mock_frequency(word: &str) -> u64 {
    let base = 5000u64.saturating_sub((word.len() as u64).saturating_mul(400));
    base.max(10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_word_always_yields_same_vector() {
        let p = MockEmbeddingProvider::new(8);
        let a = p.get("cat", "en").await.unwrap().unwrap();
        let b = p.get("CAT", "en").await.unwrap().unwrap();
        assert_eq!(a.vector, b.vector);
    }

    #[tokio::test]
    async fn different_words_yield_different_vectors() {
        let p = MockEmbeddingProvider::new(8);
        let a = p.get("cat", "en").await.unwrap().unwrap();
        let b = p.get("dog", "en").await.unwrap().unwrap();
        assert_ne!(a.vector, b.vector);
    }

    #[tokio::test]
    async fn vector_is_unit_normalized() {
        let p = MockEmbeddingProvider::new(16);
        let e = p.get("semantics", "en").await.unwrap().unwrap();
        let mag: f64 = e.vector.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!((mag - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn empty_word_not_found() {
        let p = MockEmbeddingProvider::new(8);
        assert!(p.get("", "en").await.unwrap().is_none());
    }
}
