use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommand;
use crate::config::CliConfig;

pub fn run(cmd: ConfigCommand, config: &CliConfig) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show(config),
        ConfigCommand::Set { key, value } => set(&key, &value),
    }
}

fn show(config: &CliConfig) -> Result<()> {
    let path = CliConfig::path()?;

    println!();
    println!("  {}", "Configuration".bold());
    println!("  {}", "─".repeat(36).dimmed());
    println!("  {}            {}", "file:".dimmed(), path.display());
    println!(
        "  {}  {}",
        "embedding_path:".dimmed(),
        config.embedding_path.as_deref().unwrap_or("(unset, using mock provider)")
    );
    println!("  {} {}", "default_language:".dimmed(), config.default_language);
    println!();

    if std::env::var("BRAINPRINT_EMBEDDING_PATH").is_ok() {
        println!("  {} BRAINPRINT_EMBEDDING_PATH environment variable is active", "ℹ".blue());
    }
    if std::env::var("BRAINPRINT_DEFAULT_LANGUAGE").is_ok() {
        println!("  {} BRAINPRINT_DEFAULT_LANGUAGE environment variable is active", "ℹ".blue());
    }

    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    CliConfig::set(key, value)?;
    println!("  {} {key} = {value}", "✓".green().bold());
    Ok(())
}
