use anyhow::Result;
use colored::Colorize;

use brainprint_core::Engine;

use crate::cli::ScoreCommand;
use crate::output;

pub async fn run(engine: &Engine, cmd: ScoreCommand, language: &str, json_mode: bool) -> Result<()> {
    match cmd {
        ScoreCommand::Similarity { word_a, word_b } => {
            let sim = engine.scorer.similarity(&word_a, &word_b, language).await?;
            emit(json_mode, serde_json::json!({ "similarity": sim }), || {
                output::print_header("Similarity");
                println!("  {word_a} ~ {word_b}: {}", format!("{sim:.4}").cyan());
            });
        }
        ScoreCommand::Midpoint { word, anchor_a, anchor_b } => {
            let midpoint = engine.scorer.midpoint_score(&word, &anchor_a, &anchor_b, language).await?;
            let balance = engine.scorer.balance_score(&word, &anchor_a, &anchor_b, language).await?;
            emit(
                json_mode,
                serde_json::json!({
                    "score": midpoint.score,
                    "distance_a": midpoint.distance_a,
                    "distance_b": midpoint.distance_b,
                    "balance": balance,
                }),
                || {
                    output::print_header("Midpoint");
                    println!("  {}       {}", "score:".dimmed(), format!("{:.4}", midpoint.score).cyan());
                    println!("  {}  {:.4}", "distance_a:".dimmed(), midpoint.distance_a);
                    println!("  {}  {:.4}", "distance_b:".dimmed(), midpoint.distance_b);
                    println!("  {}     {:.4}", "balance:".dimmed(), balance);
                },
            );
        }
        ScoreCommand::Rarity { word, pattern } => {
            let rarity = engine.scorer.rarity(&word, pattern.as_deref(), language).await?;
            emit(
                json_mode,
                serde_json::json!({ "rarity": rarity.rarity, "pattern_match": rarity.pattern_match }),
                || {
                    output::print_header("Rarity");
                    println!("  {}        {}", "rarity:".dimmed(), format!("{:.1}", rarity.rarity).cyan());
                    println!("  {}  {}", "pattern_match:".dimmed(), rarity.pattern_match);
                },
            );
        }
    }

    Ok(())
}

fn emit(json_mode: bool, value: serde_json::Value, print: impl FnOnce()) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&value).unwrap());
    } else {
        print();
        println!();
    }
}
