pub mod catalog;
pub mod config_cmd;
pub mod leaderboard;
pub mod play;
pub mod score;
pub mod status;

use anyhow::Result;

use crate::cli::*;
use crate::config::CliConfig;
use crate::engine_wiring::build_engine;

pub async fn dispatch(cli: Cli) -> Result<()> {
    let config = CliConfig::load()?;
    let json = cli.json;

    // Config doesn't need an engine at all; every other command does.
    if let Commands::Config(cmd) = cli.command {
        return config_cmd::run(cmd, &config);
    }

    let engine = build_engine(&config)?;

    match cli.command {
        Commands::Status => status::run(&engine, json).await,
        Commands::Catalog(cmd) => catalog::run(&engine, cmd, json).await,
        Commands::Play { game, mode, seed, language, actions } => {
            play::run(&engine, &game, &mode, &seed, &language, actions, json).await
        }
        Commands::Score(cmd) => score::run(&engine, cmd, &config.default_language, json).await,
        Commands::Leaderboard { scores } => leaderboard::run(scores, json),
        Commands::Config(_) => unreachable!("handled above"),
    }
}
