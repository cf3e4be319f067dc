use async_trait::async_trait;
use brainprint_shared::{EmbeddingProvider, EngineError, EngineResult, WordEmbedding};

/// A thin RPC interface over a single-row-fetch + vector-similarity
/// backend. This crate does not wire a concrete transport (out of scope
/// per the external-interfaces boundary) -- it defines the shape a host
/// plugs a real client into, mirroring the teacher's `NetworkCapability`
/// split between contract and transport.
#[async_trait]
pub trait EmbeddingRpcClient: Send + Sync {
    async fn fetch_one(&self, word: &str, language: &str) -> anyhow::Result<Option<WordEmbedding>>;
    async fn similarity_search(
        &self,
        vector: &[f64],
        language: &str,
        k: usize,
    ) -> anyhow::Result<Vec<(String, f64)>>;
}

pub struct NetworkEmbeddingProvider<C: EmbeddingRpcClient> {
    client: C,
}

impl<C: EmbeddingRpcClient> NetworkEmbeddingProvider<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: EmbeddingRpcClient> EmbeddingProvider for NetworkEmbeddingProvider<C> {
    async fn get(&self, word: &str, language: &str) -> EngineResult<Option<WordEmbedding>> {
        self.client
            .fetch_one(word, language)
            .await
            .map_err(|e| EngineError::ProviderUnavailable(e.to_string()))
    }

    async fn find_similar(&self, vector: &[f64], language: &str, k: usize) -> EngineResult<Vec<(String, f64)>> {
        self.client
            .similarity_search(vector, language, k)
            .await
            .map_err(|e| EngineError::ProviderUnavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FlakyClient {
        should_fail: AtomicBool,
    }

    #[async_trait]
    impl EmbeddingRpcClient for FlakyClient {
        async fn fetch_one(&self, word: &str, language: &str) -> anyhow::Result<Option<WordEmbedding>> {
            if self.should_fail.load(Ordering::SeqCst) {
                anyhow::bail!("connection reset");
            }
            Ok(Some(WordEmbedding {
                word: word.to_string(),
                language: language.to_string(),
                vector: vec![1.0, 0.0],
                frequency: None,
            }))
        }

        async fn similarity_search(
            &self,
            _vector: &[f64],
            _language: &str,
            _k: usize,
        ) -> anyhow::Result<Vec<(String, f64)>> {
            Ok(vec![("cat".into(), 0.9)])
        }
    }

    #[tokio::test]
    async fn transport_failure_maps_to_provider_unavailable() {
        let provider = NetworkEmbeddingProvider::new(FlakyClient { should_fail: AtomicBool::new(true) });
        let err = provider.get("cat", "en").await.unwrap_err();
        assert!(matches!(err, EngineError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn success_path_passes_through() {
        let provider = NetworkEmbeddingProvider::new(FlakyClient { should_fail: AtomicBool::new(false) });
        let emb = provider.get("cat", "en").await.unwrap().unwrap();
        assert_eq!(emb.word, "cat");
        let sims = provider.find_similar(&[1.0, 0.0], "en", 5).await.unwrap();
        assert_eq!(sims[0].0, "cat");
    }
}
