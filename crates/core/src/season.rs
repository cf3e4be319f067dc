//! Seasonal progression (C10): active-season selection, milestone claim
//! state machine, and tier derivation from accumulated score.

use std::collections::HashMap;

use brainprint_shared::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub requirement: f64,
    pub reward: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub id: String,
    pub number: u32,
    pub start_date: i64,
    pub end_date: i64,
    pub active: bool,
    pub game_ids: Vec<String>,
    pub milestones: Vec<Milestone>,
    /// Ascending `(score_threshold, tier_name)` pairs. The highest
    /// threshold not exceeding `total_score` wins.
    pub tier_thresholds: Vec<(f64, String)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSeasonProgress {
    pub user_id: String,
    pub season_id: String,
    pub total_score: f64,
    pub games_played: u64,
    pub tier: String,
    pub milestones_completed: Vec<String>,
    pub badges_earned: Vec<String>,
    pub updated_at: i64,
}

impl UserSeasonProgress {
    pub fn new(user_id: impl Into<String>, season_id: impl Into<String>, now: i64) -> Self {
        Self {
            user_id: user_id.into(),
            season_id: season_id.into(),
            total_score: 0.0,
            games_played: 0,
            tier: "novice".to_string(),
            milestones_completed: Vec::new(),
            badges_earned: Vec::new(),
            updated_at: now,
        }
    }
}

/// Selects the season with `start <= now <= end` and `active = true`.
/// More than one match is an `InvariantViolation` -- the store is
/// expected to maintain the at-most-one-active-season invariant, and a
/// violation here means that guarantee already broke upstream.
pub fn active_season(seasons: &[Season], now: i64) -> EngineResult<Option<&Season>> {
    let mut matches = seasons.iter().filter(|s| s.active && s.start_date <= now && now <= s.end_date);
    let first = matches.next();
    if matches.next().is_some() {
        return Err(EngineError::InvariantViolation("multiple active seasons".to_string()));
    }
    Ok(first)
}

/// Tier for `total_score` under `thresholds`: the highest threshold not
/// exceeding the score, or `"novice"` if the score is below every
/// threshold (or the list is empty).
pub fn tier_for_score(thresholds: &[(f64, String)], total_score: f64) -> String {
    thresholds
        .iter()
        .filter(|(threshold, _)| total_score >= *threshold)
        .max_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(_, tier)| tier.clone())
        .unwrap_or_else(|| "novice".to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimResult {
    pub reward: serde_json::Value,
}

/// Validates and applies a milestone claim in place, appending the claim
/// in order and refreshing `tier` from the season's thresholds.
pub fn claim_milestone(
    progress: &mut UserSeasonProgress,
    season: &Season,
    milestone_id: &str,
    now: i64,
) -> EngineResult<ClaimResult> {
    if progress.milestones_completed.iter().any(|m| m == milestone_id) {
        return Err(EngineError::AlreadyClaimed(milestone_id.to_string()));
    }

    let milestone = season
        .milestones
        .iter()
        .find(|m| m.id == milestone_id)
        .ok_or_else(|| EngineError::UnknownMilestone(milestone_id.to_string()))?;

    if progress.total_score < milestone.requirement {
        return Err(EngineError::NotAchieved);
    }

    progress.milestones_completed.push(milestone_id.to_string());
    progress.updated_at = now;
    progress.tier = tier_for_score(&season.tier_thresholds, progress.total_score);

    Ok(ClaimResult { reward: milestone.reward.clone() })
}

/// Adds a session's score to the running total, bumps `games_played`,
/// and refreshes `tier`.
pub fn record_session(progress: &mut UserSeasonProgress, season: &Season, score: f64, now: i64) {
    progress.total_score += score;
    progress.games_played += 1;
    progress.tier = tier_for_score(&season.tier_thresholds, progress.total_score);
    progress.updated_at = now;
}

/// Distribution of total scores across a season's participant pool,
/// keyed by tier name -- used for season-end summaries.
pub fn tier_distribution(progresses: &[UserSeasonProgress]) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for p in progresses {
        *counts.entry(p.tier.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season() -> Season {
        Season {
            id: "s1".to_string(),
            number: 1,
            start_date: 0,
            end_date: 1000,
            active: true,
            game_ids: vec!["word-midpoint".to_string()],
            milestones: vec![
                Milestone { id: "m1".to_string(), requirement: 100.0, reward: serde_json::json!({"coins": 50}) },
                Milestone { id: "m2".to_string(), requirement: 500.0, reward: serde_json::json!({"coins": 200}) },
            ],
            tier_thresholds: vec![
                (0.0, "bronze".to_string()),
                (200.0, "silver".to_string()),
                (600.0, "gold".to_string()),
            ],
        }
    }

    #[test]
    fn active_season_selects_single_in_range_match() {
        let seasons = vec![season()];
        let active = active_season(&seasons, 500).unwrap();
        assert_eq!(active.unwrap().id, "s1");
    }

    #[test]
    fn active_season_rejects_multiple_matches() {
        let mut other = season();
        other.id = "s2".to_string();
        let seasons = vec![season(), other];
        let err = active_season(&seasons, 500).unwrap_err();
        assert!(matches!(err, EngineError::InvariantViolation));
    }

    #[test]
    fn tier_for_score_picks_highest_qualifying_threshold() {
        let s = season();
        assert_eq!(tier_for_score(&s.tier_thresholds, 0.0), "bronze");
        assert_eq!(tier_for_score(&s.tier_thresholds, 250.0), "silver");
        assert_eq!(tier_for_score(&s.tier_thresholds, 600.0), "gold");
    }

    #[test]
    fn claim_milestone_rejects_unknown_and_unachieved_and_duplicate() {
        let s = season();
        let mut progress = UserSeasonProgress::new("u1", "s1", 0);
        progress.total_score = 50.0;

        let err = claim_milestone(&mut progress, &s, "m1", 10).unwrap_err();
        assert!(matches!(err, EngineError::NotAchieved));

        let err = claim_milestone(&mut progress, &s, "unknown", 10).unwrap_err();
        assert!(matches!(err, EngineError::UnknownMilestone(_)));

        progress.total_score = 150.0;
        claim_milestone(&mut progress, &s, "m1", 10).unwrap();
        assert_eq!(progress.milestones_completed, vec!["m1".to_string()]);

        let err = claim_milestone(&mut progress, &s, "m1", 20).unwrap_err();
        assert!(matches!(err, EngineError::AlreadyClaimed(_)));
    }

    #[test]
    fn claim_milestone_refreshes_tier_on_success() {
        let s = season();
        let mut progress = UserSeasonProgress::new("u1", "s1", 0);
        progress.total_score = 250.0;
        claim_milestone(&mut progress, &s, "m1", 10).unwrap();
        assert_eq!(progress.tier, "silver");
    }

    #[test]
    fn record_session_accumulates_score_and_games() {
        let s = season();
        let mut progress = UserSeasonProgress::new("u1", "s1", 0);
        record_session(&mut progress, &s, 100.0, 5);
        record_session(&mut progress, &s, 120.0, 10);
        assert_eq!(progress.total_score, 220.0);
        assert_eq!(progress.games_played, 2);
        assert_eq!(progress.tier, "silver");
    }
}
