//! Endurance runner (§4.4.4): a 3-5 game sequence run back-to-back as
//! Journeys, aggregated into one summary. Skill signals are merged by a
//! two-sample moving midpoint (not an arithmetic mean over N), which
//! weights later games more heavily -- a deliberate design choice
//! preserved from the distilled spec, not an oversight.

use std::collections::HashMap;
use std::sync::Arc;

use brainprint_shared::{Clock, EngineError, EngineResult, GameContext, GamePlugin, PlayerAction};

use super::journey::{run_journey, JourneyConfig};
use super::{stamp_duration, RunnerOutput};

pub struct EnduranceLeg {
    pub plugin: Arc<dyn GamePlugin>,
    pub actions: Vec<PlayerAction>,
}

pub async fn run_endurance(
    ctx: &GameContext,
    legs: Vec<EnduranceLeg>,
    clock: &dyn Clock,
) -> EngineResult<RunnerOutput> {
    if !(3..=5).contains(&legs.len()) {
        return Err(EngineError::EnduranceBadLength(legs.len()));
    }

    let t0 = clock.now_ms();
    let mut merged_signals: HashMap<String, f64> = HashMap::new();
    let mut total_score = 0.0;
    let mut per_game = Vec::with_capacity(legs.len());
    let mut history = Vec::new();

    for (i, leg) in legs.iter().enumerate() {
        let child_ctx = ctx.child(i);
        let out = run_journey(
            leg.plugin.as_ref(),
            &child_ctx,
            &leg.actions,
            JourneyConfig { max_steps: 5 },
            clock,
        )
        .await?;

        total_score += out.summary.score;
        for (skill, value) in &out.summary.skill_signals {
            merged_signals
                .entry(skill.clone())
                .and_modify(|existing| *existing = (*existing + value) / 2.0)
                .or_insert(*value);
        }
        per_game.push(serde_json::json!({
            "game_id": leg.plugin.id(),
            "score": out.summary.score,
        }));
        history.extend(out.history);
    }

    for v in merged_signals.values_mut() {
        *v = v.clamp(0.0, 100.0);
    }

    let n = legs.len() as f64;
    let average_score = total_score / n;

    let mut summary = brainprint_shared::GameResultSummary::new(average_score);
    summary.skill_signals = merged_signals;
    summary.metadata = serde_json::json!({
        "total_score": total_score,
        "average_score": average_score,
        "games": per_game,
    });
    let summary = stamp_duration(summary, t0, clock);

    Ok(RunnerOutput {
        summary,
        history,
        metadata: serde_json::json!({ "leg_count": legs.len() }),
    })
}
