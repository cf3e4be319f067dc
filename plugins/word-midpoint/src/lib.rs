//! `word-midpoint`: a one-shot game. The player is shown two anchor words
//! and submits a single bridging word; the score is how well the
//! submission sits at the semantic midpoint between the anchors.
//!
//! Grounded on the scorer's `midpoint_score`/`balance_score` operations
//! (`crates/core/src/scorer.rs`) and on the one-shot runner's contract
//! (`crates/core/src/runners/one_shot.rs`): exactly one action, state
//! forced `done` after `update`.

use std::sync::Arc;

use async_trait::async_trait;
use brainprint_shared::{
    EngineResult, GameContext, GamePlugin, GameResultSummary, GameState, Mode, PlayerAction,
    UiSchema,
};
use brainprint_core::scorer::SemanticScorer;
use serde::{Deserialize, Serialize};

/// Anchor pairs this game draws from. A real deployment would load these
/// from a curated word list per language; this reference plugin ships a
/// small fixed set so the engine has something real to dispatch.
const ANCHOR_PAIRS: &[(&str, &str)] = &[
    ("ocean", "mountain"),
    ("fire", "ice"),
    ("past", "future"),
    ("chaos", "order"),
    ("whisper", "thunder"),
    ("root", "sky"),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Payload {
    anchor_a: String,
    anchor_b: String,
    submitted: Option<String>,
}

pub struct WordMidpointGame {
    scorer: Arc<SemanticScorer>,
    modes: Vec<Mode>,
}

impl WordMidpointGame {
    pub fn new(scorer: Arc<SemanticScorer>) -> Self {
        Self { scorer, modes: vec![Mode::OneShot] }
    }
}

/// Deterministic, non-cryptographic string hash -- same algorithm used by
/// every reference plugin in this package to turn a session seed into a
/// stable index, so the anchor/theme/target choice never depends on
/// wall-clock or process-local randomness.
fn seed_index(seed: &str, modulus: usize) -> usize {
    let mut h: u64 = 1469598103934665603; // FNV offset basis
    for b in seed.bytes() {
        h ^= b as u64;
        h = h.wrapping_mul(1099511628211); // FNV prime
    }
    (h as usize) % modulus.max(1)
}

#[async_trait]
impl GamePlugin for WordMidpointGame {
    fn id(&self) -> &str {
        "word-midpoint"
    }
    fn name(&self) -> &str {
        "Word Midpoint"
    }
    fn short_description(&self) -> &str {
        "Find the word that bridges two anchor concepts."
    }
    fn supported_modes(&self) -> &[Mode] {
        &self.modes
    }

    async fn init(&self, ctx: &GameContext) -> EngineResult<GameState> {
        let idx = seed_index(&ctx.seed, ANCHOR_PAIRS.len());
        let (a, b) = ANCHOR_PAIRS[idx];
        let payload = Payload { anchor_a: a.to_string(), anchor_b: b.to_string(), submitted: None };
        Ok(GameState::new(serde_json::to_value(payload).unwrap()))
    }

    async fn update(&self, _ctx: &GameContext, mut state: GameState, action: &PlayerAction) -> EngineResult<GameState> {
        if let PlayerAction::SubmitWord { text } = action {
            let mut payload: Payload = serde_json::from_value(state.data.clone())
                .unwrap_or(Payload { anchor_a: String::new(), anchor_b: String::new(), submitted: None });
            payload.submitted = Some(text.trim().to_lowercase());
            state.data = serde_json::to_value(payload).unwrap();
        }
        Ok(state)
    }

    async fn summarize(&self, ctx: &GameContext, final_state: &GameState) -> EngineResult<GameResultSummary> {
        let payload: Payload = serde_json::from_value(final_state.data.clone())
            .unwrap_or(Payload { anchor_a: String::new(), anchor_b: String::new(), submitted: None });

        let Some(word) = payload.submitted else {
            return Ok(GameResultSummary::new(0.0));
        };

        let midpoint = self
            .scorer
            .midpoint_score(&word, &payload.anchor_a, &payload.anchor_b, &ctx.language_code)
            .await?;
        let balance = self
            .scorer
            .balance_score(&word, &payload.anchor_a, &payload.anchor_b, &ctx.language_code)
            .await?;

        let score = (midpoint.score * 100.0).round();
        let summary = GameResultSummary::new(score)
            .with_signal("semantic_precision", score)
            .with_signal("analogy", (balance * 100.0).round())
            .with_signal("context_inference", ((1.0 - midpoint.distance_a.min(midpoint.distance_b)) * 100.0).round());

        Ok(summary)
    }

    fn ui_schema(&self) -> UiSchema {
        UiSchema(serde_json::json!({
            "layout": "anchor_pair",
            "input": "text",
            "feedback": "midpoint_heatmap",
        }))
    }
}
