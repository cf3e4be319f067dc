//! Traits for the external collaborators named in the external-interfaces
//! section: embedding provider, session store, leaderboard store, friendship
//! store, and clock. Production implementations (sqlx-backed, reqwest-backed)
//! are a host's responsibility; this crate ships in-memory reference
//! implementations for tests and demos only.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEmbedding {
    pub word: String,
    pub language: String,
    pub vector: Vec<f64>,
    pub frequency: Option<u64>,
}

/// A provider of word embeddings, wrapped by the core crate's cache.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn get(&self, word: &str, language: &str) -> EngineResult<Option<WordEmbedding>>;
    async fn has(&self, word: &str, language: &str) -> EngineResult<bool> {
        Ok(self.get(word, language).await?.is_some())
    }
    /// Vector-similarity RPC some providers support; default is unsupported.
    async fn find_similar(
        &self,
        _vector: &[f64],
        _language: &str,
        _k: usize,
    ) -> EngineResult<Vec<(String, f64)>> {
        Ok(Vec::new())
    }
}

/// Persists a finished session summary, idempotent on `session_id`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn put(&self, session_id: &str, user_id: &str, summary_json: serde_json::Value) -> EngineResult<()>;
}

#[derive(Debug, Clone, Default)]
pub struct LeaderboardRow {
    pub user_id: String,
    pub game_id: String,
    pub mode: String,
    pub best_score: f64,
    pub average_score: f64,
    pub games_played: u64,
    pub best_session_id: Option<String>,
}

/// The store backing the leaderboard projector. The projector's pure
/// computations (rank, percentile, tier) consume whatever this returns; the
/// store owns persistence and compare-and-swap discipline on write.
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    async fn upsert(&self, row: LeaderboardRow) -> EngineResult<LeaderboardRow>;
    async fn get(&self, user_id: &str, game_id: &str, mode: &str) -> EngineResult<Option<LeaderboardRow>>;
    async fn all(&self, game_id: &str, mode: &str) -> EngineResult<Vec<LeaderboardRow>>;
}

#[async_trait]
pub trait FriendshipStore: Send + Sync {
    /// Already-resolved friend ids for `user_id`. Symmetry, if any, is this
    /// store's concern, not the projector's.
    async fn friends_of(&self, user_id: &str) -> EngineResult<Vec<String>>;
}

/// Injectable wall clock.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A clock fixed at construction, for deterministic tests.
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

/// A clock that advances by a fixed step on every read, for tests that need
/// distinct-but-deterministic timestamps.
pub struct StepClock {
    next: std::sync::atomic::AtomicI64,
    step: i64,
}

impl StepClock {
    pub fn new(start: i64, step: i64) -> Self {
        Self {
            next: std::sync::atomic::AtomicI64::new(start),
            step,
        }
    }
}

impl Clock for StepClock {
    fn now_ms(&self) -> i64 {
        self.next.fetch_add(self.step, std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_never_advances() {
        let c = FixedClock(1000);
        assert_eq!(c.now_ms(), 1000);
        assert_eq!(c.now_ms(), 1000);
    }

    #[test]
    fn step_clock_advances_by_step() {
        let c = StepClock::new(0, 10);
        assert_eq!(c.now_ms(), 0);
        assert_eq!(c.now_ms(), 10);
        assert_eq!(c.now_ms(), 20);
    }
}
