use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

/// A runner strategy. See the four mode runners in the core crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    OneShot,
    Journey,
    Arena,
    Endurance,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::OneShot => "one_shot",
            Mode::Journey => "journey",
            Mode::Arena => "arena",
            Mode::Endurance => "endurance",
        }
    }
}

/// Immutable per-session context handed to every plugin call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameContext {
    pub user_id: Option<String>,
    pub language_code: String,
    /// The only non-environment input a deterministic plugin may use to
    /// derive its behavior.
    pub seed: String,
    pub mode: Mode,
    /// Epoch milliseconds at session start. Plugins may record this for UX
    /// timing but must never fold it into scoring logic.
    pub now: i64,
}

impl GameContext {
    pub fn new(language_code: impl Into<String>, seed: impl Into<String>, mode: Mode, now: i64) -> Self {
        Self {
            user_id: None,
            language_code: language_code.into(),
            seed: seed.into(),
            mode,
            now,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Derive a child context for one leg of an endurance sequence.
    pub fn child(&self, index: usize) -> Self {
        Self {
            user_id: self.user_id.clone(),
            language_code: self.language_code.clone(),
            seed: format!("{}-{}", self.seed, index),
            mode: Mode::Journey,
            now: self.now,
        }
    }
}

/// Plugin-owned state. `data` is opaque to the engine; each plugin defines
/// and serializes its own payload shape into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub step: u32,
    pub done: bool,
    pub data: serde_json::Value,
}

impl GameState {
    pub fn new(data: serde_json::Value) -> Self {
        Self {
            step: 0,
            done: false,
            data,
        }
    }
}

/// A single player input. `Custom` lets a plugin define its own shape
/// without growing this enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerAction {
    Tap { word_id: String },
    TapMany { word_ids: Vec<String> },
    SubmitWord { text: String },
    Timer,
    Noop,
    Custom { payload: serde_json::Value },
}

/// An action paired with a logical timestamp, relative to session start, in
/// milliseconds. Used by the arena runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimedAction {
    pub action: PlayerAction,
    pub timestamp_ms: i64,
}

/// The output of a completed session.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameResultSummary {
    pub score: f64,
    pub duration_ms: i64,
    pub accuracy: Option<f64>,
    pub percentile: Option<f64>,
    pub skill_signals: HashMap<String, f64>,
    pub metadata: serde_json::Value,
}

impl GameResultSummary {
    pub fn new(score: f64) -> Self {
        Self {
            score,
            duration_ms: 0,
            accuracy: None,
            percentile: None,
            skill_signals: HashMap::new(),
            metadata: serde_json::Value::Null,
        }
    }

    pub fn with_signal(mut self, name: impl Into<String>, value: f64) -> Self {
        self.skill_signals.insert(name.into(), value.clamp(0.0, 100.0));
        self
    }
}

/// Declarative UI description. Opaque to the engine; carried through
/// verbatim for the external renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSchema(pub serde_json::Value);

/// The plugin contract (C4). Implementors must be pure functions of
/// `(seed, language, mode)` plus supplied actions -- no wall-clock, no
/// hidden randomness.
#[async_trait]
pub trait GamePlugin: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn short_description(&self) -> &str;
    fn supported_modes(&self) -> &[Mode];

    async fn init(&self, ctx: &GameContext) -> EngineResult<GameState>;

    /// Unexpected actions for this plugin return the state unchanged, never
    /// an error.
    async fn update(
        &self,
        ctx: &GameContext,
        state: GameState,
        action: &PlayerAction,
    ) -> EngineResult<GameState>;

    async fn summarize(&self, ctx: &GameContext, final_state: &GameState) -> EngineResult<GameResultSummary>;

    fn ui_schema(&self) -> UiSchema;
}
