use anyhow::{Context, Result};

use brainprint_core::leaderboard::rank_rows;
use brainprint_shared::LeaderboardRow;

use crate::output;

#[derive(serde::Deserialize)]
struct ScoreEntry {
    user_id: String,
    score: f64,
}

pub fn run(scores_path: std::path::PathBuf, json_mode: bool) -> Result<()> {
    let raw = std::fs::read_to_string(&scores_path).with_context(|| format!("failed to read {}", scores_path.display()))?;
    let entries: Vec<ScoreEntry> = serde_json::from_str(&raw).context("failed to parse scores file")?;

    let rows: Vec<LeaderboardRow> = entries
        .into_iter()
        .map(|e| LeaderboardRow {
            user_id: e.user_id,
            game_id: "ad-hoc".to_string(),
            mode: "one_shot".to_string(),
            best_score: e.score,
            average_score: e.score,
            games_played: 1,
            best_session_id: None,
        })
        .collect();

    let ranked = rank_rows(rows);

    if json_mode {
        let data: Vec<_> = ranked
            .iter()
            .map(|r| {
                serde_json::json!({
                    "user_id": r.row.user_id,
                    "rank": r.rank,
                    "percentile": r.percentile,
                    "score": r.row.best_score,
                    "tier": brainprint_core::leaderboard::tier_by_percentile(r.percentile),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    output::print_header("Leaderboard");
    output::print_leaderboard_table(&ranked);
    println!();
    Ok(())
}
