//! `cluster-sprint`: a journey game. Each step reveals a themed word
//! cluster; the player taps words they believe belong to it, and the
//! score tracks how close their taps sit to the cluster's centroid.
//!
//! Grounded on the scorer's `cluster_center`/`cluster_heat`/
//! `rank_by_cluster_heat` operations (`crates/core/src/scorer.rs`) and
//! the journey runner's step/complete contract
//! (`crates/core/src/runners/journey.rs`).

use std::sync::Arc;

use async_trait::async_trait;
use brainprint_shared::{
    EngineResult, GameContext, GamePlugin, GameResultSummary, GameState, Mode, PlayerAction,
    UiSchema,
};
use brainprint_core::scorer::SemanticScorer;
use serde::{Deserialize, Serialize};

/// Themed word clusters this game draws from. Each theme's word list
/// doubles as both the cluster itself and the candidate pool the player
/// taps from -- a real deployment would mix in distractor words drawn
/// from other themes, which is left to the catalog layer that curates
/// these lists.
const THEMES: &[(&str, &[&str])] = &[
    ("weather", &["rain", "storm", "cloud", "wind", "thunder", "mist"]),
    ("emotion", &["joy", "sorrow", "anger", "calm", "fear", "delight"]),
    ("travel", &["journey", "voyage", "passport", "map", "luggage", "horizon"]),
    ("craft", &["chisel", "loom", "forge", "kiln", "needle", "lathe"]),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Payload {
    theme: String,
    candidates: Vec<String>,
    tapped: Vec<String>,
}

pub struct ClusterSprintGame {
    scorer: Arc<SemanticScorer>,
    modes: Vec<Mode>,
}

impl ClusterSprintGame {
    pub fn new(scorer: Arc<SemanticScorer>) -> Self {
        Self { scorer, modes: vec![Mode::Journey] }
    }
}

fn seed_index(seed: &str, modulus: usize) -> usize {
    let mut h: u64 = 1469598103934665603;
    for b in seed.bytes() {
        h ^= b as u64;
        h = h.wrapping_mul(1099511628211);
    }
    (h as usize) % modulus.max(1)
}

#[async_trait]
impl GamePlugin for ClusterSprintGame {
    fn id(&self) -> &str {
        "cluster-sprint"
    }
    fn name(&self) -> &str {
        "Cluster Sprint"
    }
    fn short_description(&self) -> &str {
        "Tap the words that belong to the revealed theme."
    }
    fn supported_modes(&self) -> &[Mode] {
        &self.modes
    }

    async fn init(&self, ctx: &GameContext) -> EngineResult<GameState> {
        let idx = seed_index(&ctx.seed, THEMES.len());
        let (theme, words) = THEMES[idx];
        let payload = Payload {
            theme: theme.to_string(),
            candidates: words.iter().map(|w| w.to_string()).collect(),
            tapped: Vec::new(),
        };
        Ok(GameState::new(serde_json::to_value(payload).unwrap()))
    }

    async fn update(&self, _ctx: &GameContext, mut state: GameState, action: &PlayerAction) -> EngineResult<GameState> {
        let mut payload: Payload = match serde_json::from_value(state.data.clone()) {
            Ok(p) => p,
            Err(_) => return Ok(state),
        };

        match action {
            PlayerAction::Tap { word_id } => {
                if payload.candidates.contains(word_id) && !payload.tapped.contains(word_id) {
                    payload.tapped.push(word_id.clone());
                }
            }
            PlayerAction::TapMany { word_ids } => {
                for w in word_ids {
                    if payload.candidates.contains(w) && !payload.tapped.contains(w) {
                        payload.tapped.push(w.clone());
                    }
                }
            }
            _ => return Ok(state),
        }

        state.data = serde_json::to_value(payload).unwrap();
        Ok(state)
    }

    async fn summarize(&self, ctx: &GameContext, final_state: &GameState) -> EngineResult<GameResultSummary> {
        let payload: Payload = serde_json::from_value(final_state.data.clone())
            .unwrap_or(Payload { theme: String::new(), candidates: Vec::new(), tapped: Vec::new() });

        if payload.tapped.is_empty() {
            return Ok(GameResultSummary::new(0.0));
        }

        let center = self.scorer.cluster_center(&payload.candidates, &ctx.language_code).await?;

        let mut heat_sum = 0.0;
        for word in &payload.tapped {
            let heat = self.scorer.cluster_heat(word, &center, &ctx.language_code).await?;
            heat_sum += heat.heat;
        }
        let mean_heat = heat_sum / payload.tapped.len() as f64;

        let precision = mean_heat * 100.0;
        let breadth = (payload.tapped.len() as f64 / payload.candidates.len().max(1) as f64) * 100.0;
        let score = (precision * 0.7 + breadth * 0.3).round();

        let summary = GameResultSummary::new(score)
            .with_signal("divergent_thinking", breadth.round())
            .with_signal("association_breadth", breadth.round())
            .with_signal("originality", precision.round());

        Ok(summary)
    }

    fn ui_schema(&self) -> UiSchema {
        UiSchema(serde_json::json!({
            "layout": "word_grid",
            "input": "multi_tap",
            "feedback": "cluster_heatmap",
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brainprint_core::embedding::{EmbeddingService, MockEmbeddingProvider};

    fn game() -> ClusterSprintGame {
        let provider: Arc<dyn brainprint_shared::EmbeddingProvider> = Arc::new(MockEmbeddingProvider::new(16));
        let scorer = Arc::new(SemanticScorer::new(Arc::new(EmbeddingService::new(provider, 100))));
        ClusterSprintGame::new(scorer)
    }

    fn ctx(seed: &str) -> GameContext {
        GameContext::new("en", seed, Mode::Journey, 0)
    }

    #[tokio::test]
    async fn init_picks_a_deterministic_theme() {
        let game = game();
        let a = game.init(&ctx("seed-1")).await.unwrap();
        let b = game.init(&ctx("seed-1")).await.unwrap();
        assert_eq!(a.data, b.data);
    }

    #[tokio::test]
    async fn tapping_a_non_candidate_word_is_ignored() {
        let game = game();
        let state = game.init(&ctx("seed-1")).await.unwrap();
        let before = state.data.clone();
        let state = game
            .update(&ctx("seed-1"), state, &PlayerAction::Tap { word_id: "not-in-theme".to_string() })
            .await
            .unwrap();
        assert_eq!(state.data, before);
    }

    #[tokio::test]
    async fn duplicate_taps_do_not_double_count() {
        let game = game();
        let state = game.init(&ctx("seed-1")).await.unwrap();
        let payload: Payload = serde_json::from_value(state.data.clone()).unwrap();
        let word = payload.candidates[0].clone();
        let state = game
            .update(&ctx("seed-1"), state, &PlayerAction::Tap { word_id: word.clone() })
            .await
            .unwrap();
        let state = game.update(&ctx("seed-1"), state, &PlayerAction::Tap { word_id: word }).await.unwrap();
        let payload: Payload = serde_json::from_value(state.data).unwrap();
        assert_eq!(payload.tapped.len(), 1);
    }

    #[tokio::test]
    async fn no_taps_scores_zero() {
        let game = game();
        let state = game.init(&ctx("seed-1")).await.unwrap();
        let summary = game.summarize(&ctx("seed-1"), &state).await.unwrap();
        assert_eq!(summary.score, 0.0);
    }

    #[tokio::test]
    async fn tapping_every_candidate_maximizes_breadth() {
        let game = game();
        let state = game.init(&ctx("seed-1")).await.unwrap();
        let payload: Payload = serde_json::from_value(state.data.clone()).unwrap();
        let state = game
            .update(&ctx("seed-1"), state, &PlayerAction::TapMany { word_ids: payload.candidates.clone() })
            .await
            .unwrap();
        let summary = game.summarize(&ctx("seed-1"), &state).await.unwrap();
        assert_eq!(summary.skill_signals["association_breadth"], 100.0);
    }
}
