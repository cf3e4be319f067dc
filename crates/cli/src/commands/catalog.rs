use anyhow::{Context, Result};
use colored::Colorize;

use brainprint_core::Engine;
use brainprint_shared::GamePlugin as _;

use crate::cli::CatalogCommand;
use crate::output;

pub async fn run(engine: &Engine, cmd: CatalogCommand, json_mode: bool) -> Result<()> {
    match cmd {
        CatalogCommand::List => list(engine, json_mode),
        CatalogCommand::Show { game } => show(engine, &game, json_mode),
    }
}

fn list(engine: &Engine, json_mode: bool) -> Result<()> {
    let games = engine.catalog.get_all();

    if json_mode {
        let data: Vec<_> = games
            .iter()
            .map(|g| {
                serde_json::json!({
                    "id": g.id(),
                    "name": g.name(),
                    "modes": g.supported_modes().iter().map(|m| m.as_str()).collect::<Vec<_>>(),
                    "description": g.short_description(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    output::print_header("Game Catalog");
    output::print_catalog_table(&games);
    println!();
    Ok(())
}

fn show(engine: &Engine, game_id: &str, json_mode: bool) -> Result<()> {
    let game = engine
        .catalog
        .get(game_id)
        .with_context(|| format!("unknown game id: {game_id}"))?;
    let schema = game.ui_schema();

    if json_mode {
        let data = serde_json::json!({
            "id": game.id(),
            "name": game.name(),
            "modes": game.supported_modes().iter().map(|m| m.as_str()).collect::<Vec<_>>(),
            "description": game.short_description(),
            "ui_schema": schema.0,
        });
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    output::print_header(&format!("{} ({})", game.name(), game.id()));
    println!("  {}  {}", "modes:".dimmed(), game.supported_modes().iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", "));
    println!("  {}", game.short_description());
    println!();
    println!("  {}", "UI schema:".dimmed());
    println!("{}", serde_json::to_string_pretty(&schema.0)?);
    println!();
    Ok(())
}
