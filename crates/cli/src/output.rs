use colored::Colorize;
use comfy_table::{presets::NOTHING, ContentArrangement, Table};

use brainprint_core::leaderboard::RankedRow;
use brainprint_shared::GamePlugin;

/// Print a decorated section header.
pub fn print_header(title: &str) {
    let line = "─".repeat(36);
    println!();
    println!("  {}", title.bold());
    println!("  {}", line.dimmed());
}

/// Create a styled spinner with a message.
pub fn spinner(msg: &str) -> indicatif::ProgressBar {
    let pb = indicatif::ProgressBar::new_spinner();
    pb.set_style(
        indicatif::ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("  {spinner} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Print the game catalog as a table: id, name, supported modes.
pub fn print_catalog_table(games: &[std::sync::Arc<dyn GamePlugin>]) {
    if games.is_empty() {
        println!("  {}", "No games registered.".dimmed());
        return;
    }

    let mut table = Table::new();
    table.load_preset(NOTHING).set_content_arrangement(ContentArrangement::Dynamic);

    for game in games {
        let modes = game.supported_modes().iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
        table.add_row(vec![
            game.id().bold().to_string(),
            game.name().to_string(),
            modes.dimmed().to_string(),
            game.short_description().dimmed().to_string(),
        ]);
    }

    println!("{table}");
}

/// Print ranked leaderboard rows with tier labels.
pub fn print_leaderboard_table(ranked: &[RankedRow]) {
    if ranked.is_empty() {
        println!("  {}", "No scores to rank.".dimmed());
        return;
    }

    let mut table = Table::new();
    table.load_preset(NOTHING).set_content_arrangement(ContentArrangement::Dynamic);

    for row in ranked {
        let tier = brainprint_core::leaderboard::tier_by_percentile(row.percentile);
        table.add_row(vec![
            format!("{}", row.rank).bold().to_string(),
            row.row.user_id.clone(),
            format!("{:.1}", row.row.best_score),
            format!("{:.0}%ile", row.percentile).dimmed().to_string(),
            tier.to_string(),
        ]);
    }

    println!("{table}");
}
