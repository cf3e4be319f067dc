//! `synonym-arena`: a timed (arena) game. A rotating target word is shown;
//! the player taps candidate words they believe are synonyms before the
//! clock runs out. Score blends average similarity of accepted taps against
//! the target with a rarity bonus for reaching into less common
//! vocabulary, and `actions_per_second` (computed by the arena runner)
//! drives the `speed` signal.
//!
//! Grounded on the scorer's `average_similarity`/`rarity` operations
//! (`crates/core/src/scorer.rs`) and the arena runner's timestamp-cutoff
//! contract (`crates/core/src/runners/arena.rs`), which is where
//! `actions_per_second`/`action_count` actually get computed -- this
//! plugin only reads them back out of its own accumulated taps at
//! `summarize` time, since the runner's metadata isn't visible to the
//! plugin itself.

use std::sync::Arc;

use async_trait::async_trait;
use brainprint_shared::{
    EngineResult, GameContext, GamePlugin, GameResultSummary, GameState, Mode, PlayerAction,
    UiSchema,
};
use brainprint_core::scorer::SemanticScorer;
use serde::{Deserialize, Serialize};

/// Rotating target words and their candidate pools. A real deployment
/// would draw these from a curated thesaurus per language; this reference
/// plugin ships a small fixed set.
const TARGETS: &[(&str, &[&str])] = &[
    ("happy", &["joyful", "content", "glum", "elated", "cheerful", "somber"]),
    ("quick", &["fast", "rapid", "slow", "swift", "sluggish", "brisk"]),
    ("bright", &["radiant", "luminous", "dim", "dull", "gleaming", "murky"]),
    ("strong", &["sturdy", "robust", "feeble", "mighty", "frail", "potent"]),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Payload {
    target: String,
    candidates: Vec<String>,
    accepted: Vec<String>,
    taps: u32,
}

pub struct SynonymArenaGame {
    scorer: Arc<SemanticScorer>,
    modes: Vec<Mode>,
}

impl SynonymArenaGame {
    pub fn new(scorer: Arc<SemanticScorer>) -> Self {
        Self { scorer, modes: vec![Mode::Arena] }
    }
}

/// Same FNV-1a seed derivation every reference plugin in this package
/// uses to turn a session seed into a stable index, deterministically.
fn seed_index(seed: &str, modulus: usize) -> usize {
    let mut h: u64 = 1469598103934665603;
    for b in seed.bytes() {
        h ^= b as u64;
        h = h.wrapping_mul(1099511628211);
    }
    (h as usize) % modulus.max(1)
}

#[async_trait]
impl GamePlugin for SynonymArenaGame {
    fn id(&self) -> &str {
        "synonym-arena"
    }
    fn name(&self) -> &str {
        "Synonym Arena"
    }
    fn short_description(&self) -> &str {
        "Tap as many synonyms of the target word as you can before time runs out."
    }
    fn supported_modes(&self) -> &[Mode] {
        &self.modes
    }

    async fn init(&self, ctx: &GameContext) -> EngineResult<GameState> {
        let idx = seed_index(&ctx.seed, TARGETS.len());
        let (target, words) = TARGETS[idx];
        let payload = Payload {
            target: target.to_string(),
            candidates: words.iter().map(|w| w.to_string()).collect(),
            accepted: Vec::new(),
            taps: 0,
        };
        Ok(GameState::new(serde_json::to_value(payload).unwrap()))
    }

    async fn update(&self, ctx: &GameContext, mut state: GameState, action: &PlayerAction) -> EngineResult<GameState> {
        let mut payload: Payload = match serde_json::from_value(state.data.clone()) {
            Ok(p) => p,
            Err(_) => return Ok(state),
        };

        let Some(word) = (match action {
            PlayerAction::Tap { word_id } => Some(word_id.clone()),
            _ => None,
        }) else {
            return Ok(state);
        };

        if !payload.candidates.contains(&word) {
            return Ok(state);
        }

        payload.taps += 1;
        if !payload.accepted.contains(&word) {
            // Only a genuine synonym (similarity above a lenient midline)
            // counts toward the accepted set -- a candidate pool mixes in
            // antonyms/distractors the player must discriminate against.
            let sim = self.scorer.similarity(&payload.target, &word, &ctx.language_code).await?;
            if sim >= 0.5 {
                payload.accepted.push(word);
            }
        }

        state.data = serde_json::to_value(payload).unwrap();
        Ok(state)
    }

    async fn summarize(&self, ctx: &GameContext, final_state: &GameState) -> EngineResult<GameResultSummary> {
        let payload: Payload = serde_json::from_value(final_state.data.clone()).unwrap_or(Payload {
            target: String::new(),
            candidates: Vec::new(),
            accepted: Vec::new(),
            taps: 0,
        });

        if payload.accepted.is_empty() {
            return Ok(GameResultSummary::new(0.0)
                .with_signal("vocabulary", 0.0)
                .with_signal("synonym_fluency", 0.0));
        }

        let avg_sim = self
            .scorer
            .average_similarity(&payload.target, &payload.accepted, &ctx.language_code)
            .await?;

        let mut rarity_sum = 0.0;
        for word in &payload.accepted {
            rarity_sum += self.scorer.rarity(word, None, &ctx.language_code).await?.rarity;
        }
        let avg_rarity = rarity_sum / payload.accepted.len() as f64;

        let accuracy = if payload.taps > 0 {
            payload.accepted.len() as f64 / payload.taps as f64
        } else {
            0.0
        };

        let score = (avg_sim * 100.0 * 0.7 + avg_rarity * 0.3).round();

        let mut summary = GameResultSummary::new(score)
            .with_signal("vocabulary", (avg_sim * 100.0).round())
            .with_signal("synonym_fluency", (accuracy * 100.0).round())
            .with_signal("rarity_sense", avg_rarity.round());
        summary.accuracy = Some(accuracy);

        Ok(summary)
    }

    fn ui_schema(&self) -> UiSchema {
        UiSchema(serde_json::json!({
            "layout": "falling_words",
            "input": "tap",
            "feedback": "streak_counter",
            "animation": "timer_ring",
        }))
    }
}
