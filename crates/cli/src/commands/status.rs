use anyhow::Result;
use colored::Colorize;

use brainprint_core::Engine;
use brainprint_shared::GamePlugin as _;

use crate::output;

pub async fn run(engine: &Engine, json_mode: bool) -> Result<()> {
    let games = engine.catalog.get_all();

    if json_mode {
        let data = serde_json::json!({
            "config": {
                "embedding_cache_capacity": engine.config.embedding_cache_capacity,
                "embedding_vector_dim": engine.config.embedding_vector_dim,
                "default_language": engine.config.default_language,
                "journey_max_steps_default": engine.config.journey_max_steps_default,
                "arena_duration_ms_default": engine.config.arena_duration_ms_default,
                "session_action_limit": engine.config.session_action_limit,
            },
            "catalog": {
                "total": games.len(),
                "ids": games.iter().map(|g| g.id().to_string()).collect::<Vec<_>>(),
            },
        });
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    output::print_header("Brainprint Engine Status");

    println!("  {}   v{}", "Engine:".dimmed(), env!("CARGO_PKG_VERSION"));
    println!(
        "  {}   {} registered ({})",
        "Games:".dimmed(),
        games.len(),
        games.iter().map(|g| g.id()).collect::<Vec<_>>().join(", ").green()
    );
    println!(
        "  {}  dimension {}, cache capacity {}",
        "Embeddings:".dimmed(),
        engine.config.embedding_vector_dim,
        engine.config.embedding_cache_capacity
    );
    println!(
        "  {}   journey max_steps={}, arena duration_ms={}, session_action_limit={}",
        "Runners:".dimmed(),
        engine.config.journey_max_steps_default,
        engine.config.arena_duration_ms_default,
        engine.config.session_action_limit
    );
    println!();

    Ok(())
}
