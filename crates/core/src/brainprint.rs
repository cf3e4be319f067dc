//! Brainprint aggregator (C8): online aggregation of skill signals into a
//! 22-dimensional `[0,100]` profile, plus the batch alternative and
//! derived reports (top-k, category distribution, insights).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

const RESERVED_META_KEYS: [&str; 3] = ["last_updated", "total_games", "confidence_score"];

/// The 22-skill set this expansion fixes to make §4.8's category
/// distribution implementable (the distilled spec names a "22-dimensional"
/// profile in the glossary but never enumerates the dimensions).
pub const SEMANTIC_SKILLS: [&str; 6] = [
    "vocabulary",
    "semantic_precision",
    "rarity_sense",
    "synonym_fluency",
    "analogy",
    "context_inference",
];
pub const CREATIVE_SKILLS: [&str; 5] =
    ["divergent_thinking", "flexibility", "originality", "association_breadth", "metaphor"];
pub const EXECUTIVE_SKILLS: [&str; 6] = [
    "working_memory",
    "planning",
    "inhibition",
    "task_switching",
    "sustained_attention",
    "processing_speed",
];
pub const AFFECTIVE_SKILLS: [&str; 5] =
    ["balance", "risk_tolerance", "frustration_tolerance", "pacing", "confidence_calibration"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Semantic,
    Creative,
    Executive,
    Affective,
}

fn category_members(category: SkillCategory) -> &'static [&'static str] {
    match category {
        SkillCategory::Semantic => &SEMANTIC_SKILLS,
        SkillCategory::Creative => &CREATIVE_SKILLS,
        SkillCategory::Executive => &EXECUTIVE_SKILLS,
        SkillCategory::Affective => &AFFECTIVE_SKILLS,
    }
}

/// A static lookup from a growth-area skill to a recommended game id.
/// Incomplete coverage is fine: `insights` only surfaces up to 3 unique
/// recommendations and silently drops skills with no mapped game.
fn recommended_game_for_skill(skill: &str) -> Option<&'static str> {
    match skill {
        "vocabulary" | "synonym_fluency" | "rarity_sense" => Some("synonym-arena"),
        "semantic_precision" | "context_inference" | "analogy" => Some("word-midpoint"),
        "divergent_thinking" | "flexibility" | "association_breadth" | "metaphor" | "originality" => {
            Some("cluster-sprint")
        }
        "working_memory" | "planning" | "task_switching" | "inhibition" | "sustained_attention" => {
            Some("pivot-chain")
        }
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brainprint {
    pub skills: HashMap<String, f64>,
    pub total_games: u64,
    pub confidence_score: f64,
    pub last_updated: i64,
}

impl Brainprint {
    pub fn empty(now: i64) -> Self {
        Self {
            skills: HashMap::new(),
            total_games: 0,
            confidence_score: 0.0,
            last_updated: now,
        }
    }
}

fn is_reserved(key: &str) -> bool {
    RESERVED_META_KEYS.contains(&key)
}

/// `confidence = clamp(round(30 + 20*log10(games)), 0, 95)`, with the
/// degenerate `games = 0 -> 0` case handled explicitly since `log10(0)`
/// is undefined.
pub fn confidence_for_games(games: u64) -> f64 {
    if games == 0 {
        return 0.0;
    }
    (30.0 + 20.0 * (games as f64).log10()).round().clamp(0.0, 95.0)
}

/// Batch aggregation: arithmetic mean of every skill's values across the
/// full session history, rounded to an integer.
pub fn aggregate_batch(sessions: &[HashMap<String, f64>], now: i64) -> Brainprint {
    let mut sums: HashMap<String, f64> = HashMap::new();
    let mut counts: HashMap<String, u64> = HashMap::new();

    for session in sessions {
        for (skill, value) in session {
            if is_reserved(skill) {
                continue;
            }
            *sums.entry(skill.clone()).or_insert(0.0) += value;
            *counts.entry(skill.clone()).or_insert(0) += 1;
        }
    }

    let skills = sums
        .into_iter()
        .map(|(skill, sum)| {
            let n = counts[&skill] as f64;
            (skill, (sum / n).round())
        })
        .collect();

    Brainprint {
        skills,
        total_games: sessions.len() as u64,
        confidence_score: confidence_for_games(sessions.len() as u64),
        last_updated: now,
    }
}

/// Incremental EMA update: `alpha = min(0.3, 1/sqrt(total_games_played))`.
/// A skill absent from the existing profile defaults to `50` before the
/// EMA step is applied, per §4.8.
pub fn aggregate_incremental(
    mut current: Brainprint,
    new_session: &HashMap<String, f64>,
    total_games_played: u64,
    now: i64,
) -> Brainprint {
    let games = total_games_played.max(1);
    let alpha = (1.0 / (games as f64).sqrt()).min(0.3);

    for (skill, value) in new_session {
        if is_reserved(skill) {
            continue;
        }
        let prior = *current.skills.get(skill).unwrap_or(&50.0);
        let updated = prior * (1.0 - alpha) + value * alpha;
        current.skills.insert(skill.clone(), updated);
    }

    current.total_games = total_games_played;
    current.confidence_score = confidence_for_games(total_games_played);
    current.last_updated = now;
    current
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillScore {
    pub skill: String,
    pub value: f64,
}

/// Descending by value, ties broken by skill name ascending, truncated
/// to `k` entries.
pub fn top_k_skills(brainprint: &Brainprint, k: usize) -> Vec<SkillScore> {
    let mut entries: Vec<SkillScore> = brainprint
        .skills
        .iter()
        .map(|(skill, value)| SkillScore { skill: skill.clone(), value: *value })
        .collect();
    entries.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.skill.cmp(&b.skill))
    });
    entries.truncate(k);
    entries
}

/// Arithmetic mean of whichever category members are present in the
/// profile; `0` when none are present.
pub fn category_distribution(brainprint: &Brainprint) -> HashMap<SkillCategory, f64> {
    [
        SkillCategory::Semantic,
        SkillCategory::Creative,
        SkillCategory::Executive,
        SkillCategory::Affective,
    ]
    .into_iter()
    .map(|category| {
        let members = category_members(category);
        let present: Vec<f64> = members
            .iter()
            .filter_map(|m| brainprint.skills.get(*m).copied())
            .collect();
        let value = if present.is_empty() {
            0.0
        } else {
            present.iter().sum::<f64>() / present.len() as f64
        };
        (category, value)
    })
    .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insights {
    pub strengths: Vec<SkillScore>,
    pub growth_areas: Vec<SkillScore>,
    pub recommended_games: Vec<String>,
}

/// `{strengths=top3, growth_areas=bottom3, recommended_games}`. Growth
/// areas are the bottom 3 by value (ties broken the same way as top-k, so
/// `bottom_k` is `top_k` reversed rather than a separately-sorted pass).
pub fn insights(brainprint: &Brainprint) -> Insights {
    let strengths = top_k_skills(brainprint, 3);

    let mut ascending: Vec<SkillScore> = brainprint
        .skills
        .iter()
        .map(|(skill, value)| SkillScore { skill: skill.clone(), value: *value })
        .collect();
    ascending.sort_by(|a, b| {
        a.value
            .partial_cmp(&b.value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.skill.cmp(&b.skill))
    });
    let growth_areas: Vec<SkillScore> = ascending.into_iter().take(3).collect();

    let mut recommended_games = Vec::new();
    for area in &growth_areas {
        if let Some(game) = recommended_game_for_skill(&area.skill) {
            if !recommended_games.iter().any(|g: &String| g == game) {
                recommended_games.push(game.to_string());
            }
        }
        if recommended_games.len() == 3 {
            break;
        }
    }

    Insights { strengths, growth_areas, recommended_games }
}
