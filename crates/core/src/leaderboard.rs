//! Leaderboard projector (C9): pure ranking/percentile/pagination/merge
//! functions over `LeaderboardRow` snapshots. Persistence itself lives
//! behind the `LeaderboardStore` trait in the shared crate; this module
//! only projects rows that have already been loaded.

use brainprint_shared::LeaderboardRow;

#[derive(Debug, Clone)]
pub struct RankedRow {
    pub row: LeaderboardRow,
    pub rank: u32,
    pub percentile: f64,
}

/// Dense ranking: ties share a rank, and the next distinct score takes
/// `rank + 1` (not `rank + tie_count`). Rows are sorted by `best_score`
/// descending first.
///
/// Percentile is computed independently of rank, per §4.9's literal
/// `better_count = |{s : s > score}|` -- under dense ranking, `rank - 1`
/// undercounts `better_count` whenever a tie sits above the current row
/// (two entries tied at 90 above a row at 80 means `better_count = 2`,
/// not `rank - 1 = 1`), so this counts entries directly rather than
/// deriving it from rank.
pub fn rank_rows(mut rows: Vec<LeaderboardRow>) -> Vec<RankedRow> {
    rows.sort_by(|a, b| b.best_score.partial_cmp(&a.best_score).unwrap_or(std::cmp::Ordering::Equal));

    let n = rows.len();
    let mut out = Vec::with_capacity(n);
    let mut rank = 0u32;
    let mut last_score: Option<f64> = None;
    // Index where the current tie group started; every row before it has a
    // strictly greater score, since `rows` is sorted descending.
    let mut group_start = 0usize;

    for (i, row) in rows.into_iter().enumerate() {
        if last_score != Some(row.best_score) {
            rank += 1;
            last_score = Some(row.best_score);
            group_start = i;
        }
        let percentile = percentile_for_better_count(group_start, n);
        out.push(RankedRow { row, rank, percentile });
    }
    out
}

/// `round((N - better_count) / N * 100)`. An empty population has no
/// meaningful percentile; `50` is the documented neutral default.
pub fn percentile_for_better_count(better_count: usize, population: usize) -> f64 {
    if population == 0 {
        return 50.0;
    }
    ((population as f64 - better_count as f64) / population as f64 * 100.0).round()
}

/// Percentile for a row ranked `rank` (1-based, dense) in a population with
/// no ties above it -- a convenience for callers that only have the rank,
/// not the full row list. When ties are possible, prefer `rank_rows`, which
/// computes `better_count` directly per row.
pub fn percentile_for_rank(rank: u32, population: usize) -> f64 {
    percentile_for_better_count(rank.saturating_sub(1) as usize, population)
}

pub fn tier_by_percentile(percentile: f64) -> &'static str {
    if percentile >= 95.0 {
        "diamond"
    } else if percentile >= 85.0 {
        "platinum"
    } else if percentile >= 70.0 {
        "gold"
    } else if percentile >= 50.0 {
        "silver"
    } else {
        "bronze"
    }
}

pub fn tier_by_rank(rank: u32) -> &'static str {
    match rank {
        1 => "legendary",
        2..=10 => "master",
        11..=50 => "expert",
        51..=200 => "advanced",
        201..=1000 => "intermediate",
        _ => "novice",
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    pub rows: Vec<RankedRow>,
    pub has_more: bool,
    pub total: usize,
}

pub fn paginate(ranked: Vec<RankedRow>, offset: usize, limit: usize) -> Page {
    let total = ranked.len();
    let has_more = offset + limit < total;
    let rows = ranked.into_iter().skip(offset).take(limit).collect();
    Page { rows, has_more, total }
}

/// Restricts a ranked population view to `{user_id} union friend_ids`,
/// preserving each row's rank/percentile as computed against the *full*
/// population (a friends view is a filtered lens, not its own ranking).
pub fn friends_view(ranked: &[RankedRow], user_id: &str, friend_ids: &[String]) -> Vec<RankedRow> {
    ranked
        .iter()
        .filter(|r| r.row.user_id == user_id || friend_ids.iter().any(|f| f == &r.row.user_id))
        .cloned()
        .collect()
}

/// Merges a new session score into an existing row (or creates one),
/// updating `best_score` (max), the running `average_score`, and
/// `games_played`. `best_session_id` only changes on a strict
/// improvement over the prior best.
pub fn merge_submission(
    existing: Option<LeaderboardRow>,
    user_id: &str,
    game_id: &str,
    mode: &str,
    new_score: f64,
    new_session_id: &str,
) -> LeaderboardRow {
    match existing {
        None => LeaderboardRow {
            user_id: user_id.to_string(),
            game_id: game_id.to_string(),
            mode: mode.to_string(),
            best_score: new_score,
            average_score: new_score,
            games_played: 1,
            best_session_id: Some(new_session_id.to_string()),
        },
        Some(mut row) => {
            let games = row.games_played + 1;
            let average = (row.average_score * row.games_played as f64 + new_score) / games as f64;
            row.average_score = round_2dp(average);
            row.games_played = games;
            if new_score > row.best_score {
                row.best_score = new_score;
                row.best_session_id = Some(new_session_id.to_string());
            }
            row
        }
    }
}

fn round_2dp(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyStats {
    pub total_players: usize,
    pub average_score: f64,
    pub median_score: f64,
    pub top_score: f64,
    pub bottom_score: f64,
}

/// Median of an even-length population takes the lower of the two
/// middle elements, not their average -- matching the rest of this
/// module's preference for reproducible, non-interpolated statistics.
pub fn daily_stats(scores: &[f64]) -> Option<DailyStats> {
    if scores.is_empty() {
        return None;
    }
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let median = sorted[(n - 1) / 2];
    let average = sorted.iter().sum::<f64>() / n as f64;

    Some(DailyStats {
        total_players: n,
        average_score: round_2dp(average),
        median_score: median,
        top_score: sorted[n - 1],
        bottom_score: sorted[0],
    })
}
