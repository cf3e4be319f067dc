//! One-shot runner (§4.4.1): exactly one action, forced `done=true` after
//! `update`, a two-step history.

use brainprint_shared::{Clock, EngineError, EngineResult, GameContext, GamePlugin, PlayerAction};

use super::{stamp_duration, RunnerOutput};

pub async fn run_one_shot(
    plugin: &dyn GamePlugin,
    ctx: &GameContext,
    actions: &[PlayerAction],
    clock: &dyn Clock,
) -> EngineResult<RunnerOutput> {
    if actions.len() != 1 {
        return Err(EngineError::OneShotRequiresOneAction(actions.len()));
    }

    let t0 = clock.now_ms();
    let initial = plugin.init(ctx).await?;
    let mut history = vec![serde_json::to_value(&initial).unwrap_or(serde_json::Value::Null)];

    let mut state = plugin.update(ctx, initial, &actions[0]).await?;
    state.step = 1;
    state.done = true;
    history.push(serde_json::to_value(&state).unwrap_or(serde_json::Value::Null));

    let summary = plugin.summarize(ctx, &state).await?;
    let summary = stamp_duration(summary, t0, clock);

    Ok(RunnerOutput {
        summary,
        history,
        metadata: serde_json::json!({}),
    })
}
