//! Embedding store (C1): a bounded, deduplicating cache in front of a
//! pluggable provider.

mod file_provider;
mod mock_provider;
mod network_provider;

pub use file_provider::FileEmbeddingProvider;
pub use mock_provider::MockEmbeddingProvider;
pub use network_provider::NetworkEmbeddingProvider;

use std::collections::HashMap;
use std::sync::Arc;

use brainprint_shared::{EmbeddingProvider, EngineError, EngineResult, WordEmbedding};
use tokio::sync::Mutex;

/// Dedupe/cache key: case-folded word plus language.
fn cache_key(word: &str, language: &str) -> (String, String) {
    (word.to_lowercase(), language.to_string())
}

/// Wraps an `EmbeddingProvider` with a bounded LRU-ish cache and single-
/// flight dedup on miss. The cache is the only process-wide mutable state
/// in this crate (§5).
pub struct EmbeddingService {
    provider: Arc<dyn EmbeddingProvider>,
    capacity: usize,
    // `Mutex` rather than `RwLock` because every hit also needs to bump
    // recency; this mirrors the teacher's rate limiter's single-map-guard
    // style (`DashMap` there, `Mutex<HashMap>` here since we also need
    // ordered eviction, which a concurrent map can't give cheaply).
    cache: Mutex<LruCache>,
    in_flight: Mutex<HashMap<(String, String), Arc<tokio::sync::Notify>>>,
}

struct LruCache {
    capacity: usize,
    map: HashMap<(String, String), WordEmbedding>,
    order: Vec<(String, String)>,
}

impl LruCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            map: HashMap::new(),
            order: Vec::new(),
        }
    }

    fn get(&mut self, key: &(String, String)) -> Option<WordEmbedding> {
        if let Some(v) = self.map.get(key).cloned() {
            self.touch(key);
            Some(v)
        } else {
            None
        }
    }

    fn touch(&mut self, key: &(String, String)) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            let k = self.order.remove(pos);
            self.order.push(k);
        }
    }

    fn insert(&mut self, key: (String, String), value: WordEmbedding) {
        if !self.map.contains_key(&key) && self.order.len() >= self.capacity {
            if let Some(oldest) = self.order.first().cloned() {
                self.order.remove(0);
                self.map.remove(&oldest);
            }
        }
        self.touch(&key);
        if !self.order.contains(&key) {
            self.order.push(key.clone());
        }
        self.map.insert(key, value);
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

impl EmbeddingService {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, capacity: usize) -> Self {
        Self {
            provider,
            capacity: capacity.max(1),
            cache: Mutex::new(LruCache::new(capacity.max(1))),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get(&self, word: &str, language: &str) -> EngineResult<WordEmbedding> {
        let key = cache_key(word, language);

        if let Some(hit) = self.cache.lock().await.get(&key) {
            return Ok(hit);
        }

        // Single-flight: only the first caller for a cold key hits the
        // provider; concurrent callers wait on a notify and then re-check
        // the cache.
        loop {
            let mut in_flight = self.in_flight.lock().await;
            if let Some(notify) = in_flight.get(&key).cloned() {
                drop(in_flight);
                notify.notified().await;
                if let Some(hit) = self.cache.lock().await.get(&key) {
                    return Ok(hit);
                }
                continue;
            }
            let notify = Arc::new(tokio::sync::Notify::new());
            in_flight.insert(key.clone(), notify.clone());
            drop(in_flight);

            let result = self.provider.get(word, language).await;

            let mut guard = self.in_flight.lock().await;
            guard.remove(&key);
            drop(guard);
            notify.notify_waiters();

            return match result? {
                Some(emb) => {
                    self.cache.lock().await.insert(key, emb.clone());
                    Ok(emb)
                }
                None => Err(EngineError::EmbeddingNotFound {
                    word: word.to_string(),
                    language: language.to_string(),
                }),
            };
        }
    }

    pub async fn has(&self, word: &str, language: &str) -> bool {
        self.get(word, language).await.is_ok()
    }

    pub async fn cache_len(&self) -> usize {
        self.cache.lock().await.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
