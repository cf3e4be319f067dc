//! Mode runners (C6): four orchestrators sharing one skeleton --
//! `init`, repeated `update`, then `summarize`, with `duration_ms`
//! stamped from wall clock at the end. Each runner differs only in
//! termination and how it feeds actions to `update`.

mod arena;
mod endurance;
mod journey;
mod one_shot;

pub use arena::{run_arena, ArenaConfig};
pub use endurance::{run_endurance, EnduranceLeg};
pub use journey::{run_journey, JourneyConfig};
pub use one_shot::run_one_shot;

use brainprint_shared::{Clock, GameResultSummary};

/// A runner's full output: the summary plus an optional state snapshot
/// history, for clients that want step-by-step replay, plus runner-level
/// metadata (e.g. `actual_steps`, `action_count`) distinct from whatever
/// the plugin itself put in `summary.metadata`.
#[derive(Debug, Clone)]
pub struct RunnerOutput {
    pub summary: GameResultSummary,
    pub history: Vec<serde_json::Value>,
    pub metadata: serde_json::Value,
}

pub(crate) fn stamp_duration(mut summary: GameResultSummary, t0: i64, clock: &dyn Clock) -> GameResultSummary {
    summary.duration_ms = clock.now_ms() - t0;
    summary
}

/// Merges `entries` into `summary.metadata`, treating a non-object (or
/// absent/null) existing value as an empty object rather than discarding
/// it silently -- a plugin that didn't set metadata still ends up with
/// the runner's own bookkeeping fields.
pub(crate) fn merge_into_summary_metadata(
    summary: &mut GameResultSummary,
    entries: &[(&str, serde_json::Value)],
) {
    let mut obj = match summary.metadata.take() {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    for (k, v) in entries {
        obj.insert((*k).to_string(), v.clone());
    }
    summary.metadata = serde_json::Value::Object(obj);
}
