//! Journey runner (§4.4.2): bounded multi-step loop. Breaks early when the
//! plugin sets `done`, otherwise forces `done=true` once the step budget
//! (or the supplied action list) is exhausted.

use brainprint_shared::{Clock, EngineResult, GameContext, GamePlugin, PlayerAction};

use super::{merge_into_summary_metadata, stamp_duration, RunnerOutput};

#[derive(Debug, Clone, Copy)]
pub struct JourneyConfig {
    pub max_steps: u32,
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self { max_steps: 5 }
    }
}

pub async fn run_journey(
    plugin: &dyn GamePlugin,
    ctx: &GameContext,
    actions: &[PlayerAction],
    config: JourneyConfig,
    clock: &dyn Clock,
) -> EngineResult<RunnerOutput> {
    let t0 = clock.now_ms();
    let mut state = plugin.init(ctx).await?;
    let mut history = vec![serde_json::to_value(&state).unwrap_or(serde_json::Value::Null)];

    let limit = (actions.len() as u32).min(config.max_steps) as usize;
    let mut applied = 0usize;

    for action in actions.iter().take(limit) {
        state = plugin.update(ctx, state, action).await?;
        state.step = (applied + 1) as u32;
        applied += 1;
        history.push(serde_json::to_value(&state).unwrap_or(serde_json::Value::Null));
        if state.done {
            break;
        }
    }

    if !state.done {
        state.done = true;
    }

    let mut summary = plugin.summarize(ctx, &state).await?;
    merge_into_summary_metadata(
        &mut summary,
        &[("attempts", serde_json::json!(applied))],
    );
    let summary = stamp_duration(summary, t0, clock);

    Ok(RunnerOutput {
        summary,
        history,
        metadata: serde_json::json!({ "actual_steps": applied }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use brainprint_shared::{FixedClock, GameResultSummary, GameState, Mode, UiSchema};

    /// Marks `done` once `data.taps >= 3`.
    struct TapUntilThree;

    #[async_trait]
    impl GamePlugin for TapUntilThree {
        fn id(&self) -> &str {
            "tap3"
        }
        fn name(&self) -> &str {
            "Tap Three"
        }
        fn short_description(&self) -> &str {
            "done at 3 taps"
        }
        fn supported_modes(&self) -> &[Mode] {
            &[Mode::Journey]
        }
        async fn init(&self, _ctx: &GameContext) -> EngineResult<GameState> {
            Ok(GameState::new(serde_json::json!({"taps": 0})))
        }
        async fn update(
            &self,
            _ctx: &GameContext,
            mut state: GameState,
            _action: &PlayerAction,
        ) -> EngineResult<GameState> {
            let taps = state.data["taps"].as_i64().unwrap_or(0) + 1;
            state.data = serde_json::json!({"taps": taps});
            if taps >= 3 {
                state.done = true;
            }
            Ok(state)
        }
        async fn summarize(
            &self,
            _ctx: &GameContext,
            final_state: &GameState,
        ) -> EngineResult<GameResultSummary> {
            let taps = final_state.data["taps"].as_i64().unwrap_or(0);
            Ok(GameResultSummary::new(taps as f64 * 10.0))
        }
        fn ui_schema(&self) -> UiSchema {
            UiSchema(serde_json::json!({}))
        }
    }

    fn ctx() -> GameContext {
        GameContext::new("en", "seed", Mode::Journey, 0)
    }

    #[tokio::test]
    async fn early_completion_stops_the_loop() {
        let clock = FixedClock(0);
        let actions = vec![
            PlayerAction::Noop,
            PlayerAction::Noop,
            PlayerAction::Noop,
            PlayerAction::Noop,
            PlayerAction::Noop,
        ];
        let out = run_journey(&TapUntilThree, &ctx(), &actions, JourneyConfig::default(), &clock)
            .await
            .unwrap();
        assert_eq!(out.metadata["actual_steps"], serde_json::json!(3));
        assert_eq!(out.summary.metadata["attempts"], serde_json::json!(3));
        assert_eq!(out.history.len(), 4);
    }

    #[tokio::test]
    async fn exhausting_actions_without_done_forces_done() {
        let clock = FixedClock(0);
        let actions = vec![PlayerAction::Noop, PlayerAction::Noop];
        let out = run_journey(&TapUntilThree, &ctx(), &actions, JourneyConfig::default(), &clock)
            .await
            .unwrap();
        assert_eq!(out.metadata["actual_steps"], serde_json::json!(2));
        assert_eq!(out.history.len(), 3);
    }

    #[tokio::test]
    async fn no_actions_summarizes_initial_state() {
        let clock = FixedClock(0);
        let out = run_journey(&TapUntilThree, &ctx(), &[], JourneyConfig::default(), &clock)
            .await
            .unwrap();
        assert_eq!(out.history.len(), 1);
        assert_eq!(out.summary.score, 0.0);
    }

    #[tokio::test]
    async fn respects_max_steps_even_with_more_actions_supplied() {
        let clock = FixedClock(0);
        let actions = vec![PlayerAction::Noop; 10];
        let out = run_journey(
            &TapUntilThree,
            &ctx(),
            &actions,
            JourneyConfig { max_steps: 1 },
            &clock,
        )
        .await
        .unwrap();
        assert_eq!(out.metadata["actual_steps"], serde_json::json!(1));
    }
}
