//! Arena runner (§4.4.3): a timed stream of actions. Time is logical --
//! each `TimedAction.timestamp_ms` is relative to session start, not wall
//! clock -- so the runner's determinism contract (§4.4.5) holds even
//! though the mode is named "timed".

use brainprint_shared::{Clock, EngineResult, GameContext, GamePlugin, TimedAction};

use super::{merge_into_summary_metadata, stamp_duration, RunnerOutput};

#[derive(Debug, Clone, Copy)]
pub struct ArenaConfig {
    pub duration_ms: i64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self { duration_ms: 60_000 }
    }
}

pub async fn run_arena(
    plugin: &dyn GamePlugin,
    ctx: &GameContext,
    actions: &[TimedAction],
    config: ArenaConfig,
    clock: &dyn Clock,
) -> EngineResult<RunnerOutput> {
    let t0 = clock.now_ms();
    let mut state = plugin.init(ctx).await?;
    let mut history = vec![serde_json::to_value(&state).unwrap_or(serde_json::Value::Null)];

    let mut applied = 0u32;
    let mut last_timestamp = 0i64;

    for timed in actions {
        if timed.timestamp_ms > config.duration_ms {
            break;
        }
        state = plugin.update(ctx, state, &timed.action).await?;
        applied += 1;
        state.step = applied;
        last_timestamp = timed.timestamp_ms;
        history.push(serde_json::to_value(&state).unwrap_or(serde_json::Value::Null));
        if state.done {
            break;
        }
    }

    let mut summary = plugin.summarize(ctx, &state).await?;
    let actions_per_second = if config.duration_ms > 0 {
        applied as f64 / config.duration_ms as f64 * 1000.0
    } else {
        0.0
    };
    merge_into_summary_metadata(
        &mut summary,
        &[
            ("actual_duration", serde_json::json!(last_timestamp)),
            ("action_count", serde_json::json!(applied)),
            ("actions_per_second", serde_json::json!(actions_per_second)),
        ],
    );
    let summary = stamp_duration(summary, t0, clock);

    Ok(RunnerOutput {
        summary,
        history,
        metadata: serde_json::json!({
            "actual_duration": last_timestamp,
            "action_count": applied,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use brainprint_shared::{FixedClock, GameResultSummary, GameState, Mode, PlayerAction, UiSchema};

    struct CounterGame;

    #[async_trait]
    impl GamePlugin for CounterGame {
        fn id(&self) -> &str {
            "counter"
        }
        fn name(&self) -> &str {
            "Counter"
        }
        fn short_description(&self) -> &str {
            "counts taps"
        }
        fn supported_modes(&self) -> &[Mode] {
            &[Mode::Arena]
        }
        async fn init(&self, _ctx: &GameContext) -> EngineResult<GameState> {
            Ok(GameState::new(serde_json::json!({})))
        }
        async fn update(
            &self,
            _ctx: &GameContext,
            state: GameState,
            _action: &PlayerAction,
        ) -> EngineResult<GameState> {
            Ok(state)
        }
        async fn summarize(
            &self,
            _ctx: &GameContext,
            final_state: &GameState,
        ) -> EngineResult<GameResultSummary> {
            Ok(GameResultSummary::new(final_state.step as f64))
        }
        fn ui_schema(&self) -> UiSchema {
            UiSchema(serde_json::json!({}))
        }
    }

    fn ctx() -> GameContext {
        GameContext::new("en", "seed", Mode::Arena, 0)
    }

    fn timed(ts: i64) -> TimedAction {
        TimedAction { action: PlayerAction::Noop, timestamp_ms: ts }
    }

    #[tokio::test]
    async fn cuts_off_at_the_duration_boundary() {
        let clock = FixedClock(0);
        let actions = vec![timed(100), timed(1100), timed(3100), timed(5100), timed(6100)];
        let out = run_arena(
            &CounterGame,
            &ctx(),
            &actions,
            ArenaConfig { duration_ms: 5000 },
            &clock,
        )
        .await
        .unwrap();
        assert_eq!(out.metadata["action_count"], serde_json::json!(3));
    }

    #[tokio::test]
    async fn stops_early_when_plugin_sets_done() {
        struct DoneAfterOne;
        #[async_trait]
        impl GamePlugin for DoneAfterOne {
            fn id(&self) -> &str {
                "done1"
            }
            fn name(&self) -> &str {
                "Done After One"
            }
            fn short_description(&self) -> &str {
                "stub"
            }
            fn supported_modes(&self) -> &[Mode] {
                &[Mode::Arena]
            }
            async fn init(&self, _ctx: &GameContext) -> EngineResult<GameState> {
                Ok(GameState::new(serde_json::json!({})))
            }
            async fn update(
                &self,
                _ctx: &GameContext,
                mut state: GameState,
                _action: &PlayerAction,
            ) -> EngineResult<GameState> {
                state.done = true;
                Ok(state)
            }
            async fn summarize(
                &self,
                _ctx: &GameContext,
                _final_state: &GameState,
            ) -> EngineResult<GameResultSummary> {
                Ok(GameResultSummary::new(1.0))
            }
            fn ui_schema(&self) -> UiSchema {
                UiSchema(serde_json::json!({}))
            }
        }

        let clock = FixedClock(0);
        let actions = vec![timed(10), timed(20), timed(30)];
        let out = run_arena(&DoneAfterOne, &ctx(), &actions, ArenaConfig::default(), &clock)
            .await
            .unwrap();
        assert_eq!(out.metadata["action_count"], serde_json::json!(1));
    }

    #[tokio::test]
    async fn percentile_is_left_unset_when_plugin_does_not_set_it() {
        let clock = FixedClock(0);
        let out = run_arena(&CounterGame, &ctx(), &[], ArenaConfig::default(), &clock)
            .await
            .unwrap();
        assert!(out.summary.percentile.is_none());
    }
}
