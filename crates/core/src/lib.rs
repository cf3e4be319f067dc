//! The brainprint engine: semantic word games, session orchestration, and
//! the player-progression projections built on top of them.
//!
//! [`Engine`] bundles the catalog, embedding cache, and scorer behind one
//! handle, mirroring the teacher's `AppState` bundling of `registry` +
//! `plugin_manager` + `config`. Unlike the teacher, this crate never binds
//! a socket: `run_game` is a plain async function a host wires into
//! whatever transport it wants.

pub mod brainprint;
pub mod catalog;
pub mod config;
pub mod embedding;
pub mod leaderboard;
pub mod runners;
pub mod scorer;
pub mod season;
pub mod vector;

use std::sync::Arc;

use brainprint_shared::{
    Clock, EngineError, EngineResult, GameContext, GameResultSummary, Mode, PlayerAction,
    SystemClock, TimedAction,
};
use serde::{Deserialize, Serialize};

pub use catalog::GameCatalog;
pub use config::EngineConfig;
pub use embedding::EmbeddingService;
pub use scorer::SemanticScorer;

/// The actions a session request carries, shaped per mode (§4.4). The
/// orchestrator picks the matching runner based on `context.mode` (after
/// forcing it to `mode`, per the session contract) and rejects a request
/// whose action shape doesn't fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionActions {
    Plain(Vec<PlayerAction>),
    Timed(Vec<TimedAction>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequest {
    pub game_id: String,
    pub mode: Mode,
    pub context: GameContext,
    pub actions: SessionActions,
}

/// A completed session's full result, returned from `run_game`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeResult {
    pub summary: GameResultSummary,
    pub history: Vec<serde_json::Value>,
    pub metadata: serde_json::Value,
}

/// Owns the process-lifetime collaborators (C1/C2/C3/C5) and dispatches
/// session requests to the four mode runners (C6). Construction is
/// write-once; `run_game` is read-many and safe to call concurrently.
pub struct Engine {
    pub catalog: Arc<GameCatalog>,
    pub embeddings: Arc<EmbeddingService>,
    pub scorer: Arc<SemanticScorer>,
    pub config: EngineConfig,
    clock: Arc<dyn Clock>,
}

impl Engine {
    pub fn new(catalog: GameCatalog, embeddings: Arc<EmbeddingService>, config: EngineConfig) -> Self {
        let scorer = Arc::new(SemanticScorer::new(embeddings.clone()));
        Self {
            catalog: Arc::new(catalog),
            embeddings,
            scorer,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Swaps the production clock for a test double. Intended for
    /// integration tests that need deterministic `duration_ms`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The session orchestrator (C7): resolves the plugin, validates the
    /// requested mode against what the plugin supports, forces
    /// `context.mode` to match the request (a caller cannot smuggle in a
    /// context built for a different mode), enforces the action-count
    /// guardrail, and dispatches to the matching runner.
    pub async fn run_game(&self, request: SessionRequest) -> EngineResult<ModeResult> {
        let plugin = self
            .catalog
            .get(&request.game_id)
            .ok_or_else(|| EngineError::MissingField(format!("unknown game id: {}", request.game_id)))?;

        if !plugin.supported_modes().contains(&request.mode) {
            return Err(EngineError::ModeUnsupported(request.mode.as_str().to_string()));
        }

        let mut ctx = request.context;
        ctx.mode = request.mode;

        let action_count = match &request.actions {
            SessionActions::Plain(a) => a.len(),
            SessionActions::Timed(a) => a.len(),
        };
        if action_count > self.config.session_action_limit {
            return Err(EngineError::BadAction(format!(
                "action count {} exceeds session_action_limit {}",
                action_count, self.config.session_action_limit
            )));
        }

        let out = match (request.mode, &request.actions) {
            (Mode::OneShot, SessionActions::Plain(actions)) => {
                runners::run_one_shot(plugin.as_ref(), &ctx, actions, self.clock.as_ref()).await?
            }
            (Mode::Journey, SessionActions::Plain(actions)) => {
                let config = runners::JourneyConfig { max_steps: self.config.journey_max_steps_default };
                runners::run_journey(plugin.as_ref(), &ctx, actions, config, self.clock.as_ref()).await?
            }
            (Mode::Arena, SessionActions::Timed(actions)) => {
                let config = runners::ArenaConfig { duration_ms: self.config.arena_duration_ms_default };
                runners::run_arena(plugin.as_ref(), &ctx, actions, config, self.clock.as_ref()).await?
            }
            (Mode::Endurance, SessionActions::Plain(_)) => {
                return Err(EngineError::BadAction(
                    "endurance sessions are composed of legs via run_endurance, not a single action list"
                        .to_string(),
                ));
            }
            (mode, actions) => {
                let shape = match actions {
                    SessionActions::Plain(_) => "plain",
                    SessionActions::Timed(_) => "timed",
                };
                return Err(EngineError::BadAction(format!(
                    "action shape '{shape}' does not match mode {}",
                    mode.as_str()
                )));
            }
        };

        Ok(ModeResult { summary: out.summary, history: out.history, metadata: out.metadata })
    }

    /// Runs a full endurance sequence (3-5 legs), each resolved from the
    /// catalog by id. Kept separate from `run_game` because an endurance
    /// session needs one plugin per leg rather than a single `game_id`.
    pub async fn run_endurance_sequence(
        &self,
        ctx: &GameContext,
        legs: Vec<(String, Vec<PlayerAction>)>,
    ) -> EngineResult<ModeResult> {
        let mut resolved = Vec::with_capacity(legs.len());
        for (game_id, actions) in legs {
            let plugin = self
                .catalog
                .get(&game_id)
                .ok_or_else(|| EngineError::MissingField(format!("unknown game id: {game_id}")))?;
            resolved.push(runners::EnduranceLeg { plugin, actions });
        }
        let out = runners::run_endurance(ctx, resolved, self.clock.as_ref()).await?;
        Ok(ModeResult { summary: out.summary, history: out.history, metadata: out.metadata })
    }
}
