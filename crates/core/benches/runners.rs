// Mode runner dispatch benchmarks.
// Critical paths:
// - crates/core/src/runners/one_shot.rs (single action, forced done)
// - crates/core/src/runners/journey.rs (bounded multi-step loop)
// - crates/core/src/runners/arena.rs (timestamp cutoff scan)
// - crates/core/src/runners/endurance.rs (N journeys + signal merge)

use std::sync::Arc;

use async_trait::async_trait;
use brainprint_core::runners::{
    run_arena, run_endurance, run_journey, run_one_shot, ArenaConfig, EnduranceLeg, JourneyConfig,
};
use brainprint_shared::{
    EngineResult, FixedClock, GameContext, GamePlugin, GameResultSummary, GameState, Mode,
    PlayerAction, TimedAction, UiSchema,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// A plugin that counts applied actions into `state.data.taps` and
/// completes once `taps` reaches `done_at` (never, if `done_at` is `None`).
struct CountingGame {
    done_at: Option<u32>,
}

#[async_trait]
impl GamePlugin for CountingGame {
    fn id(&self) -> &str {
        "bench-counter"
    }
    fn name(&self) -> &str {
        "Bench Counter"
    }
    fn short_description(&self) -> &str {
        "counts applied actions for benchmarking"
    }
    fn supported_modes(&self) -> &[Mode] {
        &[Mode::OneShot, Mode::Journey, Mode::Arena, Mode::Endurance]
    }
    async fn init(&self, _ctx: &GameContext) -> EngineResult<GameState> {
        Ok(GameState::new(serde_json::json!({"taps": 0})))
    }
    async fn update(&self, _ctx: &GameContext, mut state: GameState, _action: &PlayerAction) -> EngineResult<GameState> {
        let taps = state.data["taps"].as_i64().unwrap_or(0) + 1;
        state.data = serde_json::json!({"taps": taps});
        if let Some(done_at) = self.done_at {
            if taps as u32 >= done_at {
                state.done = true;
            }
        }
        Ok(state)
    }
    async fn summarize(&self, _ctx: &GameContext, final_state: &GameState) -> EngineResult<GameResultSummary> {
        let taps = final_state.data["taps"].as_i64().unwrap_or(0);
        Ok(GameResultSummary::new(taps as f64 * 10.0).with_signal("precision", taps as f64 * 5.0))
    }
    fn ui_schema(&self) -> UiSchema {
        UiSchema(serde_json::json!({}))
    }
}

fn ctx(mode: Mode) -> GameContext {
    GameContext::new("en", "bench-seed", mode, 0)
}

fn one_shot_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let plugin = CountingGame { done_at: None };
    let clock = FixedClock(0);

    c.bench_function("runner_one_shot", |b| {
        b.to_async(&runtime).iter(|| async {
            let actions = [PlayerAction::Noop];
            black_box(run_one_shot(&plugin, &ctx(Mode::OneShot), &actions, &clock).await.unwrap());
        });
    });
}

fn journey_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let clock = FixedClock(0);

    let mut group = c.benchmark_group("runner_journey");
    for step_count in &[1u32, 5, 20] {
        let plugin = CountingGame { done_at: None };
        let actions = vec![PlayerAction::Noop; *step_count as usize];
        group.bench_with_input(BenchmarkId::from_parameter(step_count), step_count, |b, &max_steps| {
            b.to_async(&runtime).iter(|| async {
                let config = JourneyConfig { max_steps };
                black_box(run_journey(&plugin, &ctx(Mode::Journey), &actions, config, &clock).await.unwrap());
            });
        });
    }
    group.finish();
}

fn arena_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let clock = FixedClock(0);
    let plugin = CountingGame { done_at: None };

    let mut group = c.benchmark_group("runner_arena");
    for action_count in &[10usize, 100, 1000] {
        let actions: Vec<TimedAction> = (0..*action_count)
            .map(|i| TimedAction { action: PlayerAction::Noop, timestamp_ms: i as i64 * 10 })
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(action_count), action_count, |b, _| {
            b.to_async(&runtime).iter(|| async {
                let config = ArenaConfig { duration_ms: 60_000 };
                black_box(run_arena(&plugin, &ctx(Mode::Arena), &actions, config, &clock).await.unwrap());
            });
        });
    }
    group.finish();
}

fn endurance_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let clock = FixedClock(0);

    c.bench_function("runner_endurance_five_legs", |b| {
        b.to_async(&runtime).iter(|| async {
            let legs: Vec<EnduranceLeg> = (0..5)
                .map(|_| EnduranceLeg {
                    plugin: Arc::new(CountingGame { done_at: None }) as Arc<dyn GamePlugin>,
                    actions: vec![PlayerAction::Noop; 5],
                })
                .collect();
            black_box(run_endurance(&ctx(Mode::Endurance), legs, &clock).await.unwrap());
        });
    });
}

criterion_group!(benches, one_shot_benchmark, journey_benchmark, arena_benchmark, endurance_benchmark);
criterion_main!(benches);
