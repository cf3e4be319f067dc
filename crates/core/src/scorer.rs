//! Semantic scorer (C3): named operations built on the embedding store
//! (C1) and vector ops (C2). See the missing-embedding policy column in
//! each operation's doc comment.

use std::sync::Arc;

use brainprint_shared::{EngineResult, WordEmbedding};

use crate::embedding::EmbeddingService;
use crate::vector;

pub struct SemanticScorer {
    embeddings: Arc<EmbeddingService>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredWord {
    pub word: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MidpointScore {
    pub score: f64,
    pub distance_a: f64,
    pub distance_b: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClusterHeat {
    pub heat: f64,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RarityResult {
    pub rarity: f64,
    pub pattern_match: bool,
}

/// Half-away-from-zero rounding, fixed for cross-platform reproducibility.
pub fn round_half_away_from_zero(x: f64) -> i64 {
    if x >= 0.0 {
        (x + 0.5).floor() as i64
    } else {
        (x - 0.5).ceil() as i64
    }
}

async fn resolve(embeddings: &EmbeddingService, word: &str, language: &str) -> Option<WordEmbedding> {
    embeddings.get(word, language).await.ok()
}

impl SemanticScorer {
    pub fn new(embeddings: Arc<EmbeddingService>) -> Self {
        Self { embeddings }
    }

    /// Missing either word -> `0`.
    pub async fn similarity(&self, a: &str, b: &str, language: &str) -> EngineResult<f64> {
        let (ea, eb) = (resolve(&self.embeddings, a, language).await, resolve(&self.embeddings, b, language).await);
        match (ea, eb) {
            (Some(ea), Some(eb)) => vector::cosine(&ea.vector, &eb.vector),
            _ => Ok(0.0),
        }
    }

    /// Missing the word -> `0`.
    pub async fn similarity_to_vector(&self, word: &str, v: &[f64], language: &str) -> EngineResult<f64> {
        match resolve(&self.embeddings, word, language).await {
            Some(e) => vector::cosine(&e.vector, v),
            None => Ok(0.0),
        }
    }

    /// Mean similarity of `word` against a list; missing terms contribute
    /// `0` to the mean (they are not excluded from the denominator).
    pub async fn average_similarity(&self, word: &str, others: &[String], language: &str) -> EngineResult<f64> {
        if others.is_empty() {
            return Ok(0.0);
        }
        let mut total = 0.0;
        for o in others {
            total += self.similarity(word, o, language).await?;
        }
        Ok(total / others.len() as f64)
    }

    /// Best-scoring candidate for `word`. Candidates that don't resolve are
    /// skipped; if `word` itself doesn't resolve, returns `BestUnknown`-style
    /// zero-score result over the first candidate (or `None` if none
    /// resolve either).
    pub async fn find_most_similar(&self, word: &str, candidates: &[String], language: &str) -> EngineResult<Option<ScoredWord>> {
        let ranked = self.rank_by_similarity(word, candidates, language).await?;
        Ok(ranked.into_iter().next())
    }

    /// Full ranked list, descending by similarity; ties keep input order.
    /// Used internally by `find_most_similar`/`find_best_midpoint` and
    /// exposed directly since several games need the whole ranking.
    pub async fn rank_by_similarity(&self, word: &str, candidates: &[String], language: &str) -> EngineResult<Vec<ScoredWord>> {
        let mut scored = Vec::with_capacity(candidates.len());
        let target = resolve(&self.embeddings, word, language).await;
        for c in candidates {
            let Some(ce) = resolve(&self.embeddings, c, language).await else { continue };
            let score = match &target {
                Some(t) => vector::cosine(&t.vector, &ce.vector)?,
                None => 0.0,
            };
            scored.push(ScoredWord { word: c.clone(), score });
        }
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        Ok(scored)
    }

    /// Absent words are skipped; an all-absent set is `EmptyCluster`.
    pub async fn cluster_center(&self, words: &[String], language: &str) -> EngineResult<Vec<f64>> {
        let mut vectors = Vec::new();
        for w in words {
            if let Some(e) = resolve(&self.embeddings, w, language).await {
                vectors.push(e.vector);
            }
        }
        vector::centroid(&vectors)
    }

    /// Missing `word` -> heat `0`.
    pub async fn cluster_heat(&self, word: &str, center: &[f64], language: &str) -> EngineResult<ClusterHeat> {
        let heat = match resolve(&self.embeddings, word, language).await {
            Some(e) => vector::cosine(&e.vector, center)?,
            None => 0.0,
        };
        Ok(ClusterHeat { heat, distance: 1.0 - heat })
    }

    /// Descending by heat; stable on ties by input order.
    pub async fn rank_by_cluster_heat(&self, words: &[String], center: &[f64], language: &str) -> EngineResult<Vec<ScoredWord>> {
        let mut ranked = Vec::with_capacity(words.len());
        for w in words {
            let h = self.cluster_heat(w, center, language).await?;
            ranked.push(ScoredWord { word: w.clone(), score: h.heat });
        }
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        Ok(ranked)
    }

    /// `dX = 1 - cos(word, X)`, score is `1 - mean(dA, dB)` implicitly via
    /// cosine average -- any missing embedding -> score `0`.
    pub async fn midpoint_score(&self, word: &str, a: &str, b: &str, language: &str) -> EngineResult<MidpointScore> {
        let (w, ea, eb) = (
            resolve(&self.embeddings, word, language).await,
            resolve(&self.embeddings, a, language).await,
            resolve(&self.embeddings, b, language).await,
        );
        let (Some(w), Some(ea), Some(eb)) = (w, ea, eb) else {
            return Ok(MidpointScore { score: 0.0, distance_a: 0.0, distance_b: 0.0 });
        };
        let sim_a = vector::cosine(&w.vector, &ea.vector)?;
        let sim_b = vector::cosine(&w.vector, &eb.vector)?;
        let distance_a = 1.0 - sim_a;
        let distance_b = 1.0 - sim_b;
        Ok(MidpointScore { score: (sim_a + sim_b) / 2.0, distance_a, distance_b })
    }

    /// `1 - |cos(w,A) - cos(w,B)|`; any missing -> `0`.
    pub async fn balance_score(&self, word: &str, a: &str, b: &str, language: &str) -> EngineResult<f64> {
        let (w, ea, eb) = (
            resolve(&self.embeddings, word, language).await,
            resolve(&self.embeddings, a, language).await,
            resolve(&self.embeddings, b, language).await,
        );
        let (Some(w), Some(ea), Some(eb)) = (w, ea, eb) else { return Ok(0.0) };
        let sim_a = vector::cosine(&w.vector, &ea.vector)?;
        let sim_b = vector::cosine(&w.vector, &eb.vector)?;
        Ok(1.0 - (sim_a - sim_b).abs())
    }

    /// Argmax of `midpoint_score` over candidates; unresolved candidates
    /// are skipped.
    pub async fn find_best_midpoint(&self, candidates: &[String], a: &str, b: &str, language: &str) -> EngineResult<Option<ScoredWord>> {
        let mut best: Option<ScoredWord> = None;
        for c in candidates {
            if resolve(&self.embeddings, c, language).await.is_none() {
                continue;
            }
            let ms = self.midpoint_score(c, a, b, language).await?;
            if best.as_ref().map(|b| ms.score > b.score).unwrap_or(true) {
                best = Some(ScoredWord { word: c.clone(), score: ms.score });
            }
        }
        Ok(best)
    }

    /// `None` ("Missing") if either anchor is unresolved.
    pub async fn interpolate_vectors(&self, a: &str, b: &str, alpha: f64, language: &str) -> EngineResult<Option<Vec<f64>>> {
        let (ea, eb) = (resolve(&self.embeddings, a, language).await, resolve(&self.embeddings, b, language).await);
        match (ea, eb) {
            (Some(ea), Some(eb)) => Ok(Some(vector::interpolate(&ea.vector, &eb.vector, alpha)?)),
            _ => Ok(None),
        }
    }

    /// `(B-A)/|B-A|`; `None` on absence.
    pub async fn calculate_gradient_direction(&self, a: &str, b: &str, language: &str) -> EngineResult<Option<Vec<f64>>> {
        let (ea, eb) = (resolve(&self.embeddings, a, language).await, resolve(&self.embeddings, b, language).await);
        match (ea, eb) {
            (Some(ea), Some(eb)) => {
                let diff: Vec<f64> = ea.vector.iter().zip(&eb.vector).map(|(x, y)| y - x).collect();
                Ok(Some(vector::normalize(&diff)))
            }
            _ => Ok(None),
        }
    }

    /// Position of `word` on the `a->b` gradient, `[0,1]`; any missing ->
    /// `0.5`.
    pub async fn project_onto_gradient(&self, word: &str, a: &str, b: &str, language: &str) -> EngineResult<f64> {
        let (w, ea, eb) = (
            resolve(&self.embeddings, word, language).await,
            resolve(&self.embeddings, a, language).await,
            resolve(&self.embeddings, b, language).await,
        );
        let (Some(w), Some(ea), Some(eb)) = (w, ea, eb) else { return Ok(0.5) };
        vector::project_onto(&w.vector, &ea.vector, &eb.vector)
    }

    /// Mean of the three pairwise cosines among `anchor`, `w1`, `w2`; any
    /// missing -> `0`.
    pub async fn triangle_score(&self, anchor: &str, w1: &str, w2: &str, language: &str) -> EngineResult<f64> {
        let (a, e1, e2) = (
            resolve(&self.embeddings, anchor, language).await,
            resolve(&self.embeddings, w1, language).await,
            resolve(&self.embeddings, w2, language).await,
        );
        let (Some(a), Some(e1), Some(e2)) = (a, e1, e2) else { return Ok(0.0) };
        let s1 = vector::cosine(&a.vector, &e1.vector)?;
        let s2 = vector::cosine(&a.vector, &e2.vector)?;
        let s3 = vector::cosine(&e1.vector, &e2.vector)?;
        Ok((s1 + s2 + s3) / 3.0)
    }

    /// `cos(p,A) + cos(p,B)`, range `[0,2]`; any missing -> `0`.
    pub async fn pivot_score(&self, p: &str, a: &str, b: &str, language: &str) -> EngineResult<f64> {
        let (ep, ea, eb) = (
            resolve(&self.embeddings, p, language).await,
            resolve(&self.embeddings, a, language).await,
            resolve(&self.embeddings, b, language).await,
        );
        let (Some(ep), Some(ea), Some(eb)) = (ep, ea, eb) else { return Ok(0.0) };
        Ok(vector::cosine(&ep.vector, &ea.vector)? + vector::cosine(&ep.vector, &eb.vector)?)
    }

    /// Frequency-based base rarity with a length-bucket fallback, optional
    /// `V`/`C` pattern gate. See module doc for the pattern alphabet.
    pub async fn rarity(&self, word: &str, pattern: Option<&str>, language: &str) -> EngineResult<RarityResult> {
        let base = match resolve(&self.embeddings, word, language).await.and_then(|e| e.frequency) {
            Some(freq) => (100.0 * (1.0 - (freq as f64 + 1.0).log10() / 6.0)).clamp(0.0, 100.0),
            None => rarity_length_fallback(word),
        };

        let Some(pattern) = pattern else {
            return Ok(RarityResult { rarity: base, pattern_match: false });
        };

        if matches_pattern(word, pattern) {
            Ok(RarityResult { rarity: (base * 1.2).min(100.0), pattern_match: true })
        } else {
            Ok(RarityResult { rarity: 0.0, pattern_match: false })
        }
    }
}

fn rarity_length_fallback(word: &str) -> f64 {
    match word.chars().count() {
        0..=3 => 20.0,
        4..=5 => 30.0,
        6..=7 => 50.0,
        8..=10 => 70.0,
        _ => 90.0,
    }
}

/// `V` = ascii vowel (a/e/i/o/u, case-folded), `C` = anything else,
/// including non-ASCII letters (treated as consonant-equivalent since the
/// pattern alphabet is ASCII-only).
pub fn matches_pattern(word: &str, pattern: &str) -> bool {
    let word_chars: Vec<char> = word.chars().collect();
    let pattern_chars: Vec<char> = pattern.chars().collect();
    if word_chars.len() != pattern_chars.len() {
        return false;
    }
    word_chars.iter().zip(pattern_chars.iter()).all(|(w, p)| {
        let is_vowel = w.is_ascii_alphabetic() && matches!(w.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u');
        match p.to_ascii_uppercase() {
            'V' => is_vowel,
            'C' => !is_vowel,
            _ => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::MockEmbeddingProvider;

    fn scorer(dim: usize) -> SemanticScorer {
        SemanticScorer::new(Arc::new(EmbeddingService::new(Arc::new(MockEmbeddingProvider::new(dim)), 1000)))
    }

    #[tokio::test]
    async fn similarity_self_is_one() {
        let s = scorer(8);
        let sim = s.similarity("cat", "cat", "en").await.unwrap();
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn rank_by_similarity_descends_and_keeps_order_on_ties() {
        let s = scorer(8);
        let ranked = s
            .rank_by_similarity("cat", &["cat".into(), "dog".into(), "cat".into()], "en")
            .await
            .unwrap();
        assert_eq!(ranked[0].word, "cat");
        assert!(ranked[0].score >= ranked[1].score);
    }

    #[tokio::test]
    async fn cluster_center_empty_is_error() {
        let s = scorer(8);
        let err = s.cluster_center(&[], "en").await.unwrap_err();
        matches!(err, brainprint_shared::EngineError::EmptyCluster);
    }

    #[tokio::test]
    async fn project_onto_gradient_boundaries() {
        let s = scorer(8);
        let p_a = s.project_onto_gradient("cat", "cat", "dog", "en").await.unwrap();
        assert!((p_a - 0.0).abs() < 1e-9);
        let p_b = s.project_onto_gradient("dog", "cat", "dog", "en").await.unwrap();
        assert!((p_b - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn pivot_score_range() {
        let s = scorer(8);
        let score = s.pivot_score("cat", "dog", "fox", "en").await.unwrap();
        assert!((0.0..=2.0).contains(&score));
    }

    #[test]
    fn pattern_matching_cvc() {
        assert!(matches_pattern("cat", "CVC"));
        assert!(!matches_pattern("cat", "CVV"));
        assert!(!matches_pattern("cats", "CVC"));
    }

    #[test]
    fn pattern_matching_treats_non_ascii_letters_as_consonant() {
        assert!(matches_pattern("caf\u{e9}", "CVCC"));
    }

    #[test]
    fn rarity_length_fallback_buckets() {
        assert_eq!(rarity_length_fallback("cat"), 20.0);
        assert_eq!(rarity_length_fallback("words"), 30.0);
        assert_eq!(rarity_length_fallback("example"), 50.0);
        assert_eq!(rarity_length_fallback("vocabulary"), 70.0);
        assert_eq!(rarity_length_fallback("extraordinarily"), 90.0);
    }

    #[test]
    fn half_away_from_zero_rounding() {
        assert_eq!(round_half_away_from_zero(2.5), 3);
        assert_eq!(round_half_away_from_zero(-2.5), -3);
        assert_eq!(round_half_away_from_zero(2.4), 2);
    }

    #[tokio::test]
    async fn rarity_pattern_example_from_scenario() {
        // frequency 2000 -> base = 100*(1 - log10(2001)/6) ~ 44.94; CVC
        // matches "cat" -> *1.2 ~ 53.9 -> rounds to 54.
        let freq = 2000.0;
        let base = 100.0 * (1.0 - (freq + 1.0).log10() / 6.0);
        let boosted = (base * 1.2).min(100.0);
        assert_eq!(round_half_away_from_zero(boosted), 54);
    }
}
