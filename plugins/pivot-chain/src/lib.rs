//! `pivot-chain`: a journey game, eligible to run as one leg of an
//! endurance sequence. Each step presents two fixed anchors and a
//! rotating pivot candidate; the player chooses whether the candidate
//! sits closer to the chain's current anchor pair or should be "passed"
//! to keep searching. Score blends `pivot_score` (closeness to both
//! anchors at once) with `triangle_score` (mutual coherence of anchor
//! pair and pick) across every step taken.
//!
//! Grounded on the scorer's `pivot_score`/`triangle_score` operations
//! (`crates/core/src/scorer.rs`) and the journey runner's step-bounded
//! loop (`crates/core/src/runners/journey.rs`); the endurance runner
//! (`crates/core/src/runners/endurance.rs`) drives this plugin with
//! `max_steps=5` exactly like any other journey leg, so no endurance-
//! specific code lives here.

use std::sync::Arc;

use async_trait::async_trait;
use brainprint_shared::{
    EngineResult, GameContext, GamePlugin, GameResultSummary, GameState, Mode, PlayerAction,
    UiSchema,
};
use brainprint_core::scorer::SemanticScorer;
use serde::{Deserialize, Serialize};

/// `(anchor_a, anchor_b, [pivot_candidates])` chains. Each step of a
/// session advances through one chain entry, in order; a real deployment
/// would curate many more and rotate them per language.
const CHAINS: &[(&str, &str, &[&str])] = &[
    ("river", "mountain", &["valley", "stone", "current", "peak", "delta"]),
    ("fire", "water", &["steam", "ash", "ember", "tide", "flame"]),
    ("science", "art", &["design", "theory", "craft", "method", "vision"]),
    ("silence", "noise", &["echo", "hush", "static", "murmur", "clamor"]),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PivotPick {
    step: usize,
    candidate: String,
    pivot_score: f64,
    triangle_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Payload {
    anchor_a: String,
    anchor_b: String,
    candidates: Vec<String>,
    picks: Vec<PivotPick>,
}

pub struct PivotChainGame {
    scorer: Arc<SemanticScorer>,
    modes: Vec<Mode>,
}

impl PivotChainGame {
    pub fn new(scorer: Arc<SemanticScorer>) -> Self {
        Self { scorer, modes: vec![Mode::Journey, Mode::Endurance] }
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
impl GamePlugin for PivotChainGame {
    fn id(&self) -> &str {
        "pivot-chain"
    }
    fn name(&self) -> &str {
        "Pivot Chain"
    }
    fn short_description(&self) -> &str {
        "Pick the word that pivots best between two anchor concepts, step after step."
    }
    fn supported_modes(&self) -> &[Mode] {
        &self.modes
    }

    async fn init(&self, ctx: &GameContext) -> EngineResult<GameState> {
        let idx = seed_index(&ctx.seed, CHAINS.len());
        let (a, b, candidates) = CHAINS[idx];
        let payload = Payload {
            anchor_a: a.to_string(),
            anchor_b: b.to_string(),
            candidates: candidates.iter().map(|w| w.to_string()).collect(),
            picks: Vec::new(),
        };
        Ok(GameState::new(serde_json::to_value(payload).unwrap()))
    }

    async fn update(&self, ctx: &GameContext, mut state: GameState, action: &PlayerAction) -> EngineResult<GameState> {
        let mut payload: Payload = match serde_json::from_value(state.data.clone()) {
            Ok(p) => p,
            Err(_) => return Ok(state),
        };

        let candidate = match action {
            PlayerAction::Tap { word_id } => word_id.clone(),
            PlayerAction::SubmitWord { text } => text.trim().to_lowercase(),
            _ => return Ok(state),
        };

        if !payload.candidates.contains(&candidate) {
            return Ok(state);
        }

        let pivot = self
            .scorer
            .pivot_score(&candidate, &payload.anchor_a, &payload.anchor_b, &ctx.language_code)
            .await?;
        let triangle = self
            .scorer
            .triangle_score(&payload.anchor_a, &payload.anchor_b, &candidate, &ctx.language_code)
            .await?;

        payload.picks.push(PivotPick {
            step: payload.picks.len() + 1,
            candidate,
            pivot_score: pivot,
            triangle_score: triangle,
        });

        state.data = serde_json::to_value(payload).unwrap();
        Ok(state)
    }

    async fn summarize(&self, _ctx: &GameContext, final_state: &GameState) -> EngineResult<GameResultSummary> {
        let payload: Payload = serde_json::from_value(final_state.data.clone()).unwrap_or(Payload {
            anchor_a: String::new(),
            anchor_b: String::new(),
            candidates: Vec::new(),
            picks: Vec::new(),
        });

        if payload.picks.is_empty() {
            return Ok(GameResultSummary::new(0.0)
                .with_signal("inference", 0.0)
                .with_signal("flexibility", 0.0));
        }

        let n = payload.picks.len() as f64;
        // pivot_score ranges [0,2]; normalize to [0,1] before scaling to
        // the 0..100 convention.
        let mean_pivot: f64 = payload.picks.iter().map(|p| p.pivot_score / 2.0).sum::<f64>() / n;
        let mean_triangle: f64 = payload.picks.iter().map(|p| p.triangle_score).sum::<f64>() / n;

        let score = (mean_pivot * 100.0 * 0.6 + mean_triangle * 100.0 * 0.4).round();

        // Flexibility rewards variety across picks over the chain, not
        // just raw coherence -- a chain of five identical picks shows no
        // adaptive reasoning even if each pick individually scores well.
        let unique_picks = payload
            .picks
            .iter()
            .map(|p| &p.candidate)
            .collect::<std::collections::HashSet<_>>()
            .len();
        let flexibility = (unique_picks as f64 / n) * 100.0;

        let summary = GameResultSummary::new(score)
            .with_signal("inference", (mean_pivot * 100.0).round())
            .with_signal("flexibility", flexibility.round())
            .with_signal("analogy", (mean_triangle * 100.0).round());

        Ok(summary)
    }

    fn ui_schema(&self) -> UiSchema {
        UiSchema(serde_json::json!({
            "layout": "anchor_pivot",
            "input": "tap_or_text",
            "feedback": "chain_trail",
        }))
    }
}
