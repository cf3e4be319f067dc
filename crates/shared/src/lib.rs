//! Contract types shared between the engine core and every game plugin.
//!
//! Plugins depend on this crate (not on `brainprint_core`'s runners or
//! catalog) so the dependency graph stays one-way: plugins -> shared,
//! core -> shared, core -> (scorer used by plugins at their own call site).

pub mod collaborators;
pub mod error;
pub mod game;

pub use collaborators::{
    Clock, EmbeddingProvider, FixedClock, FriendshipStore, LeaderboardRow, LeaderboardStore,
    SessionStore, StepClock, SystemClock, WordEmbedding,
};
pub use error::{EngineError, EngineResult};
pub use game::{GameContext, GamePlugin, GameResultSummary, GameState, Mode, PlayerAction, TimedAction, UiSchema};
