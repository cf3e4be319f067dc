use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use brainprint_shared::{EmbeddingProvider, EngineError, EngineResult, WordEmbedding};

use crate::vector;

/// Streams a text vocabulary file: `word v1 v2 ... vD` per line, one
/// optional `"<vocab_size> <dimension>"` header line, words lowercased on
/// ingest, dimension enforced, malformed lines skipped.
pub struct FileEmbeddingProvider {
    language: String,
    entries: HashMap<String, WordEmbedding>,
}

impl FileEmbeddingProvider {
    /// `max_count`: caps how many vectors are retained (memory guard).
    /// `normalize_on_load`: L2-normalizes every vector as it's read, so
    /// downstream cosine math never has to.
    pub fn load(
        path: impl AsRef<Path>,
        language: impl Into<String>,
        dimension: usize,
        max_count: Option<usize>,
        normalize_on_load: bool,
    ) -> anyhow::Result<Self> {
        let language = language.into();
        let text = std::fs::read_to_string(path.as_ref())?;
        let mut lines = text.lines();

        // Peek: if the first line parses as "<count> <dim>" treat it as a
        // header and skip it; otherwise rewind by re-iterating from start.
        let mut first_is_header = false;
        if let Some(first) = text.lines().next() {
            let parts: Vec<&str> = first.split_whitespace().collect();
            if parts.len() == 2 && parts.iter().all(|p| p.parse::<usize>().is_ok()) {
                first_is_header = true;
            }
        }
        if first_is_header {
            lines.next();
        }

        let mut entries = HashMap::new();
        for line in lines {
            if let Some(cap) = max_count {
                if entries.len() >= cap {
                    break;
                }
            }
            let mut parts = line.split_whitespace();
            let word = match parts.next() {
                Some(w) => w.to_lowercase(),
                None => continue,
            };
            let values: Result<Vec<f64>, _> = parts.map(|p| p.parse::<f64>()).collect();
            let values = match values {
                Ok(v) if v.len() == dimension => v,
                _ => continue,
            };
            let vector = if normalize_on_load { vector::normalize(&values) } else { values };
            entries.insert(
                word.clone(),
                WordEmbedding {
                    word,
                    language: language.clone(),
                    vector,
                    frequency: None,
                },
            );
        }

        Ok(Self { language, entries })
    }
}

#[async_trait]
impl EmbeddingProvider for FileEmbeddingProvider {
    async fn get(&self, word: &str, language: &str) -> EngineResult<Option<WordEmbedding>> {
        if language != self.language {
            return Ok(None);
        }
        Ok(self.entries.get(&word.to_lowercase()).cloned())
    }

    async fn find_similar(&self, v: &[f64], language: &str, k: usize) -> EngineResult<Vec<(String, f64)>> {
        if language != self.language {
            return Ok(Vec::new());
        }
        let mut scored: Vec<(String, f64)> = Vec::with_capacity(self.entries.len());
        for emb in self.entries.values() {
            if emb.vector.len() != v.len() {
                return Err(EngineError::DimensionMismatch { a: v.len(), b: emb.vector.len() });
            }
            scored.push((emb.word.clone(), vector::cosine(v, &emb.vector)?));
        }
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[tokio::test]
    async fn loads_without_header_and_lowercases_words() {
        let f = write_temp("Cat 1.0 0.0\nDog 0.0 1.0\n");
        let provider = FileEmbeddingProvider::load(f.path(), "en", 2, None, false).unwrap();
        let emb = provider.get("CAT", "en").await.unwrap().unwrap();
        assert_eq!(emb.word, "cat");
        assert_eq!(emb.vector, vec![1.0, 0.0]);
    }

    #[tokio::test]
    async fn header_line_is_skipped() {
        let f = write_temp("2 2\ncat 1.0 0.0\ndog 0.0 1.0\n");
        let provider = FileEmbeddingProvider::load(f.path(), "en", 2, None, false).unwrap();
        assert!(provider.get("cat", "en").await.unwrap().is_some());
        assert!(provider.get("2", "en").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_lines_are_skipped_not_fatal() {
        let f = write_temp("cat 1.0 0.0\nbroken_line_only_one_value 5\ndog 0.0 1.0\n");
        let provider = FileEmbeddingProvider::load(f.path(), "en", 2, None, false).unwrap();
        assert!(provider.get("cat", "en").await.unwrap().is_some());
        assert!(provider.get("dog", "en").await.unwrap().is_some());
        assert!(provider.get("broken_line_only_one_value", "en").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn max_count_caps_retained_vectors() {
        let f = write_temp("a 1.0 0.0\nb 0.0 1.0\nc 1.0 1.0\n");
        let provider = FileEmbeddingProvider::load(f.path(), "en", 2, Some(2), false).unwrap();
        assert!(provider.get("a", "en").await.unwrap().is_some());
        assert!(provider.get("b", "en").await.unwrap().is_some());
        assert!(provider.get("c", "en").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn normalize_on_load_unit_scales_vectors() {
        let f = write_temp("cat 3.0 4.0\n");
        let provider = FileEmbeddingProvider::load(f.path(), "en", 2, None, true).unwrap();
        let emb = provider.get("cat", "en").await.unwrap().unwrap();
        assert!((emb.vector[0] - 0.6).abs() < 1e-9);
        assert!((emb.vector[1] - 0.8).abs() < 1e-9);
    }
}
